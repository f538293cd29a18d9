//! Outreach generation payloads

use serde::{Deserialize, Serialize};

/// Body for POST /outreach
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutreachRequest {
    pub campaign_id: String,
    pub creator_id: String,
}

/// An outreach record: AI-written email plus generated voice message
///
/// POST /outreach returns only `email_content` + `audio_url`; reads return
/// the stored record with ids and timestamp filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outreach {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub campaign_id: Option<String>,
    #[serde(default)]
    pub creator_id: Option<String>,
    pub email_content: String,
    pub audio_url: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A stored outreach row, as the campaign listing returns it.
///
/// The stored column is `outreach_text`; only the single-outreach read
/// renames it to `email_content` on the way out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredOutreach {
    pub id: String,
    pub campaign_id: String,
    pub creator_id: String,
    pub outreach_text: String,
    pub audio_url: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Envelope returned by GET /outreach/campaign/{campaignId}
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutreachList {
    pub outreach: Vec<StoredOutreach>,
}

/// One per-creator entry in a batch generation response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutreachEntry {
    pub creator_id: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BatchOutreachEntry {
    pub fn succeeded(&self) -> bool {
        self.status == "success"
    }
}

/// Response of POST /outreach/batch?campaign_id=
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutreachResult {
    pub campaign_id: String,
    pub total_creators: usize,
    pub results: Vec<BatchOutreachEntry>,
    pub success_count: usize,
}
