//! Small cross-cutting response envelopes

use serde::{Deserialize, Serialize};

/// Response of GET /health
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Acknowledgement body returned by DELETE endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteAck {
    pub message: String,
}

/// Response of POST /negotiations/transcribe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    pub transcription: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_status_parses() {
        let health: HealthStatus =
            serde_json::from_str(r#"{"status": "healthy", "service": "backend"}"#)
                .expect("health");
        assert!(health.is_healthy());
    }

    #[test]
    fn delete_ack_parses() {
        let ack: DeleteAck =
            serde_json::from_str(r#"{"message": "Campaign deleted successfully"}"#).expect("ack");
        assert!(ack.message.contains("deleted"));
    }
}
