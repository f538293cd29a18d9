//! Deal operations

use reachkit_domain::{Deal, DealList, DeleteAck, NewDeal};

use super::client::ApiClient;
use super::errors::ApiError;

impl ApiClient {
    /// List all finalized deals.
    pub async fn list_deals(&self) -> Result<Vec<Deal>, ApiError> {
        let list: DealList = self.get("/deals").await?;
        Ok(list.deals)
    }

    /// Fetch one deal by id.
    pub async fn get_deal(&self, deal_id: &str) -> Result<Deal, ApiError> {
        self.get(&format!("/deals/{deal_id}")).await
    }

    /// Record a finalized deal.
    pub async fn create_deal(&self, deal: &NewDeal) -> Result<Deal, ApiError> {
        self.post("/deals", deal).await
    }

    /// Delete a deal.
    pub async fn delete_deal(&self, deal_id: &str) -> Result<DeleteAck, ApiError> {
        self.delete(&format!("/deals/{deal_id}")).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::super::client::ApiClientConfig;
    use super::*;

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(ApiClientConfig { base_url: server.uri(), ..Default::default() })
            .expect("api client")
    }

    #[tokio::test]
    async fn create_sends_final_rate_and_parses_rate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/deals"))
            .and(body_json(json!({
                "campaign_id": "c-1",
                "creator_id": "cr-1",
                "final_rate": "₹30,000",
                "deliverables": "1 reel",
                "platform": "instagram",
                "timeline": "2 weeks",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "d-1",
                "campaign_id": "c-1",
                "creator_id": "cr-1",
                "rate": "₹30,000",
                "deliverables": "1 reel",
                "platform": "instagram",
                "timeline": "2 weeks",
                "status": "active",
                "created_at": "2025-04-02T10:00:00",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let deal = NewDeal {
            campaign_id: "c-1".into(),
            creator_id: "cr-1".into(),
            final_rate: "₹30,000".into(),
            deliverables: "1 reel".into(),
            platform: "instagram".into(),
            timeline: "2 weeks".into(),
        };
        let created = client(&server).create_deal(&deal).await.expect("create");
        assert_eq!(created.rate, "₹30,000");
        assert_eq!(created.status.as_deref(), Some("active"));
    }

    #[tokio::test]
    async fn get_returns_the_stored_deal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/deals/d-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "d-1",
                "campaign_id": "c-1",
                "creator_id": "cr-1",
                "rate": "₹30,000",
                "deliverables": "1 reel",
                "platform": "instagram",
                "timeline": "2 weeks",
                "status": "active",
                "created_at": "2025-04-02T10:00:00",
            })))
            .mount(&server)
            .await;

        let deal = client(&server).get_deal("d-1").await.expect("deal");
        assert_eq!(deal.id, "d-1");
        assert_eq!(deal.rate, "₹30,000");
    }

    #[tokio::test]
    async fn get_unknown_deal_is_a_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/deals/nope"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Deal not found"})))
            .mount(&server)
            .await;

        let err = client(&server).get_deal("nope").await.expect_err("missing deal");
        assert!(err.is_not_found());
        assert!(matches!(err, ApiError::Http { status: 404, .. }));
        assert_eq!(err.detail(), Some("Deal not found"));
    }

    #[tokio::test]
    async fn list_unwraps_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/deals"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deals": []})))
            .mount(&server)
            .await;

        let deals = client(&server).list_deals().await.expect("list");
        assert!(deals.is_empty());
    }
}
