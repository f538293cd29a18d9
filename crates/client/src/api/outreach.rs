//! Outreach generation, single and batch

use reachkit_domain::{BatchOutreachResult, Outreach, OutreachList, OutreachRequest};

use super::client::ApiClient;
use super::errors::ApiError;

impl ApiClient {
    /// Generate an outreach email and voice message for one creator.
    pub async fn send_outreach(&self, request: &OutreachRequest) -> Result<Outreach, ApiError> {
        self.post("/outreach", request).await
    }

    /// Generate outreach for several creators in one call.
    ///
    /// The campaign travels in the query string and the creator ids as a
    /// bare JSON array body. Per-creator failures are reported inside the
    /// result, not as a transport error.
    pub async fn batch_outreach(
        &self,
        campaign_id: &str,
        creator_ids: &[String],
    ) -> Result<BatchOutreachResult, ApiError> {
        self.post_with_query(
            "/outreach/batch",
            &[("campaign_id", campaign_id.to_string())],
            creator_ids,
        )
        .await
    }

    /// The outreach generated for one creator in one campaign.
    ///
    /// The backend normalizes the stored row here, so ids and timestamp come
    /// back filled in alongside the email text and audio link.
    pub async fn get_outreach(
        &self,
        campaign_id: &str,
        creator_id: &str,
    ) -> Result<Outreach, ApiError> {
        self.get(&format!("/outreach/{campaign_id}/{creator_id}")).await
    }

    /// All outreach recorded for a campaign.
    pub async fn campaign_outreach(&self, campaign_id: &str) -> Result<OutreachList, ApiError> {
        self.get(&format!("/outreach/campaign/{campaign_id}")).await
    }
}
