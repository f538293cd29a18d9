//! Creator operations, including the AI-assisted search

use reachkit_domain::{
    Creator, CreatorCount, CreatorFilter, CreatorSearchRequest, CreatorSearchResponse, DeleteAck,
};

use super::client::ApiClient;
use super::errors::ApiError;

impl ApiClient {
    /// List creators, optionally filtered by category and platform.
    ///
    /// The backend returns a bare array here, not an envelope.
    pub async fn list_creators(&self, filter: &CreatorFilter) -> Result<Vec<Creator>, ApiError> {
        if filter.is_empty() {
            self.get("/creators").await
        } else {
            self.get_with_query("/creators", &filter.query_pairs()).await
        }
    }

    /// Total number of creators in the roster.
    pub async fn creators_count(&self) -> Result<CreatorCount, ApiError> {
        self.get("/creators/count").await
    }

    /// Add a creator to the roster.
    pub async fn create_creator(&self, creator: &Creator) -> Result<Creator, ApiError> {
        self.post("/creators", creator).await
    }

    /// Remove a creator.
    pub async fn delete_creator(&self, creator_id: &str) -> Result<DeleteAck, ApiError> {
        self.delete(&format!("/creators/{creator_id}")).await
    }

    /// Semantic search ranking creators against a campaign brief.
    ///
    /// Results vary between calls for the same input, so this is never
    /// cached.
    pub async fn search_creators(
        &self,
        request: &CreatorSearchRequest,
    ) -> Result<CreatorSearchResponse, ApiError> {
        self.post("/creators/search", request).await
    }
}
