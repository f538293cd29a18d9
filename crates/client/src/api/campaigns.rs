//! Campaign operations

use reachkit_domain::{Campaign, CampaignList, DeleteAck, EnhancedBrief, NewCampaign};

use super::client::ApiClient;
use super::errors::ApiError;

impl ApiClient {
    /// List all campaigns.
    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>, ApiError> {
        let list: CampaignList = self.get("/campaigns").await?;
        Ok(list.campaigns)
    }

    /// Fetch a single campaign by id.
    pub async fn get_campaign(&self, campaign_id: &str) -> Result<Campaign, ApiError> {
        self.get(&format!("/campaigns/{campaign_id}")).await
    }

    /// Create a campaign from user input.
    pub async fn create_campaign(&self, campaign: &NewCampaign) -> Result<Campaign, ApiError> {
        self.post("/campaigns", campaign).await
    }

    /// Delete a campaign.
    pub async fn delete_campaign(&self, campaign_id: &str) -> Result<DeleteAck, ApiError> {
        self.delete(&format!("/campaigns/{campaign_id}")).await
    }

    /// Ask the backend to rewrite the campaign brief with AI assistance.
    ///
    /// The backend returns only the rewritten text; the stored campaign is
    /// updated server-side, so cached campaign reads must be invalidated.
    pub async fn enhance_brief(&self, campaign_id: &str) -> Result<EnhancedBrief, ApiError> {
        self.post_empty(&format!("/campaigns/{campaign_id}/enhance-brief")).await
    }
}
