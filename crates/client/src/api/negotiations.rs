//! Negotiation operations: AI replies, history, voice transcription

use reqwest::multipart::{Form, Part};

use reachkit_domain::{NegotiationHistory, NegotiationMessage, NegotiationReply, Transcription};

use super::client::ApiClient;
use super::errors::ApiError;

impl ApiClient {
    /// Send one negotiation turn and receive the AI counterpart's reply.
    pub async fn send_negotiation(
        &self,
        message: &NegotiationMessage,
    ) -> Result<NegotiationReply, ApiError> {
        self.post("/negotiations/respond", message).await
    }

    /// Full conversation history between a campaign and a creator.
    pub async fn negotiation_history(
        &self,
        campaign_id: &str,
        creator_id: &str,
    ) -> Result<NegotiationHistory, ApiError> {
        self.get(&format!("/negotiations/{campaign_id}/{creator_id}")).await
    }

    /// Transcribe a recorded voice message.
    ///
    /// The audio travels as the `audio_file` multipart field. Streaming
    /// bodies are never retried.
    pub async fn transcribe_audio(
        &self,
        file_name: &str,
        audio: Vec<u8>,
    ) -> Result<Transcription, ApiError> {
        let part = Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str("audio/webm")
            .map_err(|err| ApiError::Config(format!("invalid mime type: {err}")))?;
        let form = Form::new().part("audio_file", part);

        self.post_multipart("/negotiations/transcribe", form).await
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
    async fn respond_returns_ai_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/negotiations/respond"))
            .and(body_json(json!({
                "campaign_id": "c-1",
                "creator_id": "cr-1",
                "message": "Can we do ₹40,000?",
                "sender": "creator",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": "We can meet at ₹35,000 with one extra story.",
                "audio_url": "/api/audio/negotiation-1.mp3",
                "sender": "ai_agent",
            })))
            .mount(&server)
            .await;

        let message = NegotiationMessage {
            campaign_id: "c-1".into(),
            creator_id: "cr-1".into(),
            message: "Can we do ₹40,000?".into(),
            sender: "creator".into(),
        };
        let reply = client(&server).send_negotiation(&message).await.expect("reply");
        assert_eq!(reply.sender, "ai_agent");
        assert!(reply.response.contains("₹35,000"));
    }

    #[tokio::test]
    async fn history_is_scoped_to_campaign_and_creator() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/negotiations/c-1/cr-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"messages": []})))
            .mount(&server)
            .await;

        let history =
            client(&server).negotiation_history("c-1", "cr-1").await.expect("history");
        assert!(history.messages.is_empty());
    }

    #[tokio::test]
    async fn transcribe_uploads_multipart_audio_file() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/negotiations/transcribe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "transcription": "Can we talk about rates?",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let transcription = client(&server)
            .transcribe_audio("recording.webm", b"fake-audio-bytes".to_vec())
            .await
            .expect("transcription");
        assert_eq!(transcription.transcription, "Can we talk about rates?");

        let requests = server.received_requests().await.unwrap();
        let content_type = requests[0]
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("multipart/form-data"));
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"audio_file\""));
        assert!(body.contains("recording.webm"));
    }
}
