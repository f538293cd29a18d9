//! Deal records and payloads

use serde::{Deserialize, Serialize};

/// A finalized deal as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: String,
    pub campaign_id: String,
    pub creator_id: String,
    pub rate: String,
    pub deliverables: String,
    pub platform: String,
    pub timeline: String,
    #[serde(default)]
    pub status: Option<String>,
    pub created_at: String,
}

/// Body for POST /deals
///
/// The backend's request model names the rate field `final_rate` even though
/// the stored record calls it `rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDeal {
    pub campaign_id: String,
    pub creator_id: String,
    pub final_rate: String,
    pub deliverables: String,
    pub platform: String,
    pub timeline: String,
}

/// Envelope returned by GET /deals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DealList {
    pub deals: Vec<Deal>,
}
