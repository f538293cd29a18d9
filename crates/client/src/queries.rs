//! Cached query facade
//!
//! [`QueryClient`] is the surface UI code talks to. Reads go through the
//! shared query cache keyed by [`keys`]; mutations call the API directly and
//! invalidate the affected keys on success, so the next read revalidates.
//! AI endpoints whose output varies per call (search, contract generation,
//! transcription) bypass the cache entirely.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use reachkit_common::cache::{
    Invalidations, QueryCache, QueryCacheConfig, QueryError, QueryKey, QueryStats,
    QuerySubscription,
};
use reachkit_domain::{
    BatchOutreachResult, Campaign, Config, Contract, Creator, CreatorFilter, CreatorSearchRequest,
    CreatorSearchResponse, Deal, DeleteAck, EnhancedBrief, HealthStatus, NegotiationHistory,
    NegotiationMessage, NegotiationReply, NewCampaign, NewDeal, Outreach, OutreachList,
    OutreachRequest, Transcription,
};

use crate::api::{ApiClient, ApiClientConfig, ApiError};

/// Canonical cache keys, one constructor per cached read.
///
/// Keys of one resource share the resource name, so prefix invalidation of
/// e.g. [`CAMPAIGNS`] reaches both the list and every detail key.
pub mod keys {
    use reachkit_common::cache::QueryKey;
    use reachkit_domain::CreatorFilter;

    pub const CAMPAIGNS: &str = "campaigns";
    pub const CREATORS: &str = "creators";
    pub const DEALS: &str = "deals";
    pub const OUTREACH: &str = "outreach";
    pub const NEGOTIATIONS: &str = "negotiations";

    pub fn campaigns() -> QueryKey {
        QueryKey::new(CAMPAIGNS)
    }

    pub fn campaign(campaign_id: &str) -> QueryKey {
        QueryKey::with_params(CAMPAIGNS, [("id", campaign_id)])
    }

    pub fn creators(filter: &CreatorFilter) -> QueryKey {
        QueryKey::with_params(CREATORS, filter.query_pairs())
    }

    /// Count lives under the creators resource so roster mutations
    /// invalidate it together with the lists.
    pub fn creators_count() -> QueryKey {
        QueryKey::with_params(CREATORS, [("view", "count")])
    }

    pub fn deals() -> QueryKey {
        QueryKey::new(DEALS)
    }

    pub fn deal(deal_id: &str) -> QueryKey {
        QueryKey::with_params(DEALS, [("id", deal_id)])
    }

    pub fn outreach(campaign_id: &str) -> QueryKey {
        QueryKey::with_params(OUTREACH, [("campaign_id", campaign_id)])
    }

    pub fn outreach_detail(campaign_id: &str, creator_id: &str) -> QueryKey {
        QueryKey::with_params(
            OUTREACH,
            [("campaign_id", campaign_id), ("creator_id", creator_id)],
        )
    }

    pub fn negotiation(campaign_id: &str, creator_id: &str) -> QueryKey {
        QueryKey::with_params(
            NEGOTIATIONS,
            [("campaign_id", campaign_id), ("creator_id", creator_id)],
        )
    }
}

/// API client with a query cache in front of its reads.
///
/// Cheap to clone; clones share the cache and the underlying HTTP client.
#[derive(Clone)]
pub struct QueryClient {
    api: Arc<ApiClient>,
    cache: QueryCache<serde_json::Value>,
}

impl QueryClient {
    /// Create a client from explicit API and cache configuration.
    pub fn new(
        api_config: ApiClientConfig,
        cache_config: QueryCacheConfig,
    ) -> Result<Self, ApiError> {
        Ok(Self { api: Arc::new(ApiClient::new(api_config)?), cache: QueryCache::new(cache_config) })
    }

    /// Create a client from loaded workspace configuration.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(
            ApiClientConfig::from(config),
            QueryCacheConfig {
                retention: Duration::from_secs(config.cache.retention_seconds),
            },
        )
    }

    /// The underlying API client, for uncached one-off calls.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// The underlying cache, for state snapshots and direct control.
    pub fn cache(&self) -> &QueryCache<serde_json::Value> {
        &self.cache
    }

    // ---- cached reads ----

    pub async fn campaigns(&self) -> Result<Vec<Campaign>, ApiError> {
        self.cached(keys::campaigns(), |api| async move { api.list_campaigns().await }).await
    }

    pub async fn campaign(&self, campaign_id: &str) -> Result<Campaign, ApiError> {
        let id = campaign_id.to_string();
        self.cached(keys::campaign(campaign_id), move |api| async move {
            api.get_campaign(&id).await
        })
        .await
    }

    pub async fn creators(&self, filter: &CreatorFilter) -> Result<Vec<Creator>, ApiError> {
        let filter_owned = filter.clone();
        self.cached(keys::creators(filter), move |api| async move {
            api.list_creators(&filter_owned).await
        })
        .await
    }

    pub async fn creators_count(&self) -> Result<u64, ApiError> {
        self.cached(keys::creators_count(), |api| async move {
            api.creators_count().await.map(|count| count.count)
        })
        .await
    }

    pub async fn deals(&self) -> Result<Vec<Deal>, ApiError> {
        self.cached(keys::deals(), |api| async move { api.list_deals().await }).await
    }

    pub async fn deal(&self, deal_id: &str) -> Result<Deal, ApiError> {
        let id = deal_id.to_string();
        self.cached(keys::deal(deal_id), move |api| async move { api.get_deal(&id).await }).await
    }

    pub async fn outreach(&self, campaign_id: &str) -> Result<OutreachList, ApiError> {
        let id = campaign_id.to_string();
        self.cached(keys::outreach(campaign_id), move |api| async move {
            api.campaign_outreach(&id).await
        })
        .await
    }

    pub async fn outreach_detail(
        &self,
        campaign_id: &str,
        creator_id: &str,
    ) -> Result<Outreach, ApiError> {
        let campaign = campaign_id.to_string();
        let creator = creator_id.to_string();
        self.cached(keys::outreach_detail(campaign_id, creator_id), move |api| async move {
            api.get_outreach(&campaign, &creator).await
        })
        .await
    }

    pub async fn negotiation_history(
        &self,
        campaign_id: &str,
        creator_id: &str,
    ) -> Result<NegotiationHistory, ApiError> {
        let campaign = campaign_id.to_string();
        let creator = creator_id.to_string();
        self.cached(keys::negotiation(campaign_id, creator_id), move |api| async move {
            api.negotiation_history(&campaign, &creator).await
        })
        .await
    }

    // ---- mutations (invalidate on success) ----

    pub async fn create_campaign(&self, campaign: &NewCampaign) -> Result<Campaign, ApiError> {
        self.mutated(
            Invalidations::none().prefix(keys::CAMPAIGNS),
            self.api.create_campaign(campaign),
        )
        .await
    }

    pub async fn delete_campaign(&self, campaign_id: &str) -> Result<DeleteAck, ApiError> {
        self.mutated(
            Invalidations::none().prefix(keys::CAMPAIGNS),
            self.api.delete_campaign(campaign_id),
        )
        .await
    }

    /// Rewrite a campaign brief with AI assistance.
    ///
    /// The backend updates the stored campaign, so campaign reads are
    /// invalidated even though only the new text comes back.
    pub async fn enhance_brief(&self, campaign_id: &str) -> Result<EnhancedBrief, ApiError> {
        self.mutated(
            Invalidations::none().prefix(keys::CAMPAIGNS),
            self.api.enhance_brief(campaign_id),
        )
        .await
    }

    pub async fn create_creator(&self, creator: &Creator) -> Result<Creator, ApiError> {
        self.mutated(Invalidations::none().prefix(keys::CREATORS), self.api.create_creator(creator))
            .await
    }

    pub async fn delete_creator(&self, creator_id: &str) -> Result<DeleteAck, ApiError> {
        self.mutated(
            Invalidations::none().prefix(keys::CREATORS),
            self.api.delete_creator(creator_id),
        )
        .await
    }

    pub async fn create_deal(&self, deal: &NewDeal) -> Result<Deal, ApiError> {
        self.mutated(Invalidations::none().prefix(keys::DEALS), self.api.create_deal(deal)).await
    }

    pub async fn delete_deal(&self, deal_id: &str) -> Result<DeleteAck, ApiError> {
        self.mutated(Invalidations::none().prefix(keys::DEALS), self.api.delete_deal(deal_id)).await
    }

    pub async fn send_outreach(&self, request: &OutreachRequest) -> Result<Outreach, ApiError> {
        self.mutated(
            Invalidations::none().prefix(keys::OUTREACH),
            self.api.send_outreach(request),
        )
        .await
    }

    pub async fn batch_outreach(
        &self,
        campaign_id: &str,
        creator_ids: &[String],
    ) -> Result<BatchOutreachResult, ApiError> {
        self.mutated(
            Invalidations::none().prefix(keys::OUTREACH),
            self.api.batch_outreach(campaign_id, creator_ids),
        )
        .await
    }

    pub async fn send_negotiation(
        &self,
        message: &NegotiationMessage,
    ) -> Result<NegotiationReply, ApiError> {
        self.mutated(
            Invalidations::none().key(keys::negotiation(&message.campaign_id, &message.creator_id)),
            self.api.send_negotiation(message),
        )
        .await
    }

    // ---- uncached passthroughs ----

    /// AI search; results vary per call and are never cached.
    pub async fn search_creators(
        &self,
        request: &CreatorSearchRequest,
    ) -> Result<CreatorSearchResponse, ApiError> {
        self.api.search_creators(request).await
    }

    pub async fn generate_contract(&self, deal_id: &str) -> Result<Contract, ApiError> {
        self.api.generate_contract(deal_id).await
    }

    pub fn contract_download_url(&self, deal_id: &str) -> String {
        self.api.contract_download_url(deal_id)
    }

    pub async fn transcribe_audio(
        &self,
        file_name: &str,
        audio: Vec<u8>,
    ) -> Result<Transcription, ApiError> {
        self.api.transcribe_audio(file_name, audio).await
    }

    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.api.health_check().await
    }

    // ---- cache control ----

    /// Mark a key stale; the next read for it revalidates.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        self.cache.invalidate(key)
    }

    /// Mark every key of a resource family stale.
    pub fn invalidate_prefix(&self, resource: &str) -> usize {
        self.cache.invalidate_prefix(resource)
    }

    /// Register interest in a key, pinning it against garbage collection.
    pub fn subscribe(&self, key: &QueryKey) -> QuerySubscription<serde_json::Value> {
        self.cache.subscribe(key)
    }

    /// Remove entries unused for longer than the retention window.
    pub fn sweep(&self) -> usize {
        self.cache.sweep()
    }

    pub fn stats(&self) -> QueryStats {
        self.cache.stats()
    }

    /// Read through the cache, storing values as JSON so one cache serves
    /// every response type.
    async fn cached<R, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<R, ApiError>
    where
        R: Serialize + DeserializeOwned,
        F: FnOnce(Arc<ApiClient>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<R, ApiError>> + Send + 'static,
    {
        let api = Arc::clone(&self.api);
        let value = self
            .cache
            .fetch(&key, move || async move {
                let typed = fetch(api).await.map_err(QueryError::fetch)?;
                serde_json::to_value(typed)
                    .map_err(|err| QueryError::fetch(ApiError::Decode(err.to_string())))
            })
            .await
            .map_err(as_api_error)?;

        serde_json::from_value((*value).clone()).map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn mutated<R, Fut>(&self, effects: Invalidations, op: Fut) -> Result<R, ApiError>
    where
        Fut: Future<Output = Result<R, ApiError>>,
    {
        self.cache.mutate(effects, || op).await
    }
}

/// Recover the transport error a cached fetch failed with.
fn as_api_error(err: QueryError) -> ApiError {
    if let Some(api_err) = err.fetch_source().and_then(|source| source.downcast_ref::<ApiError>()) {
        return api_err.clone();
    }
    ApiError::Network(err.to_string())
}
