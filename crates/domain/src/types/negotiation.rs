//! Negotiation payloads: AI replies and conversation history

use serde::{Deserialize, Serialize};

/// Body for POST /negotiations/respond
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationMessage {
    pub campaign_id: String,
    pub creator_id: String,
    pub message: String,
    /// "brand" or "creator"; drives which side the AI answers for
    pub sender: String,
}

/// AI-generated reply plus its voice rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationReply {
    pub response: String,
    pub audio_url: String,
    pub sender: String,
}

/// One stored turn of a negotiation conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationTurn {
    #[serde(default)]
    pub id: Option<String>,
    pub campaign_id: String,
    pub creator_id: String,
    pub message: String,
    pub sender: String,
    #[serde(default)]
    pub ai_response: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Envelope returned by GET /negotiations/{campaignId}/{creatorId}
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NegotiationHistory {
    pub messages: Vec<NegotiationTurn>,
}
