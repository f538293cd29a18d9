//! Transport-level contract tests against a mock backend.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reachkit_client::{ApiClient, ApiClientConfig, ApiError};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiClientConfig { base_url: server.uri(), ..Default::default() })
        .expect("api client")
}

#[tokio::test]
async fn server_errors_are_not_retried_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/campaigns"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).list_campaigns().await.expect_err("should fail");
    assert_eq!(err.status(), Some(500));
    assert!(err.is_retryable(), "5xx is retryable by the caller's choice");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "exactly one attempt was made");
}

#[tokio::test]
async fn configured_retries_recover_from_transient_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/deals"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/deals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deals": []})))
        .mount(&server)
        .await;

    let client = ApiClient::new(ApiClientConfig {
        base_url: server.uri(),
        max_attempts: 2,
        ..Default::default()
    })
    .expect("api client");

    let deals = client.list_deals().await.expect("recovered after retry");
    assert!(deals.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn slow_responses_time_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/campaigns"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"campaigns": []}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(ApiClientConfig {
        base_url: server.uri(),
        timeout: Duration::from_millis(100),
        ..Default::default()
    })
    .expect("api client");

    let err = client.list_campaigns().await.expect_err("should time out");
    assert!(matches!(err, ApiError::Timeout(_)), "got {err:?}");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    // Bind a port, then drop it so connections are refused.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = ApiClient::new(ApiClientConfig {
        base_url: format!("http://{addr}"),
        ..Default::default()
    })
    .expect("api client");

    let err = client.health_check().await.expect_err("should fail");
    assert!(matches!(err, ApiError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn http_error_keeps_non_json_bodies_out_of_the_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/campaigns"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let err = client(&server).list_campaigns().await.expect_err("should fail");
    match err {
        ApiError::Http { status, payload } => {
            assert_eq!(status, 502);
            assert!(payload.is_none());
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn type_mismatch_is_a_decode_error_not_http() {
    let server = MockServer::start().await;
    // Envelope field missing: body is an array instead of {"campaigns": []}.
    Mock::given(method("GET"))
        .and(path("/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = client(&server).list_campaigns().await.expect_err("should fail");
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
    assert!(!err.is_retryable());
}
