// Gemini client tests against a mock HTTP server
// Author: kelexine (https://github.com/kelexine)

use bytes::Bytes;
use first_aid_relay::backend::ModelBackend;
use first_aid_relay::config::GeminiConfig;
use first_aid_relay::error::RelayError;
use first_aid_relay::gemini::GeminiClient;
use first_aid_relay::models::Attachment;
use mockito::Matcher;

const OK_BODY: &str = r#"{
  "candidates": [{
    "content": {"role": "model", "parts": [{"text": "{\"injury_name\":\"Paper cut\"}"}]},
    "finishReason": "STOP"
  }],
  "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 8, "totalTokenCount": 20}
}"#;

fn client_for(server: &mockito::ServerGuard) -> GeminiClient {
    let config = GeminiConfig {
        api_base_url: server.url(),
        text_model: "text-model".to_string(),
        vision_model: "vision-model".to_string(),
        timeout_seconds: 5,
        ..Default::default()
    };
    GeminiClient::new(&config, "test-key").unwrap()
}

#[tokio::test]
async fn test_text_prompt_uses_text_model_and_api_key() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/text-model:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::Regex("small paper cut".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(OK_BODY)
        .create_async()
        .await;

    let client = client_for(&server);
    let reply = client.generate_from_text("small paper cut").await.unwrap();

    assert_eq!(reply, "{\"injury_name\":\"Paper cut\"}");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_image_prompt_sends_inline_data_to_vision_model() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/vision-model:generateContent")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#""mimeType":"image/png""#.to_string()),
            Matcher::Regex(r#""data":"dGVzdA==""#.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(OK_BODY)
        .create_async()
        .await;

    let client = client_for(&server);
    let image = Attachment {
        media_type: "image/png".to_string(),
        bytes: Bytes::from_static(b"test"),
    };
    let reply = client.generate_from_image("look", &image).await.unwrap();

    assert!(reply.contains("Paper cut"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_error_maps_to_model_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/text-model:generateContent")
        .with_status(400)
        .with_body(r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    match client.generate_from_text("hi").await {
        Err(RelayError::ModelApi(message)) => {
            assert!(message.contains("HTTP 400"));
            assert!(message.contains("API key not valid"));
        }
        other => panic!("expected ModelApi error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_blocked_prompt_is_model_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/text-model:generateContent")
        .with_status(200)
        .with_body(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.generate_from_text("hi").await.unwrap_err();
    assert!(matches!(err, RelayError::ModelApi(ref m) if m.contains("SAFETY")));
}

#[tokio::test]
async fn test_reply_without_text_is_model_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/text-model:generateContent")
        .with_status(200)
        .with_body(r#"{"candidates": [{"finishReason": "RECITATION"}]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.generate_from_text("hi").await.unwrap_err();
    assert!(matches!(err, RelayError::ModelApi(ref m) if m.contains("RECITATION")));
}

#[tokio::test]
async fn test_garbage_envelope_is_model_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/models/text-model:generateContent")
        .with_status(200)
        .with_body("<html>proxy error</html>")
        .create_async()
        .await;

    let client = client_for(&server);
    assert!(matches!(
        client.generate_from_text("hi").await,
        Err(RelayError::ModelApi(_))
    ));
}

#[tokio::test]
async fn test_unreachable_server_is_model_api_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = GeminiConfig {
        api_base_url: format!("http://{}", addr),
        timeout_seconds: 5,
        ..Default::default()
    };
    let client = GeminiClient::new(&config, "test-key").unwrap();

    match client.generate_from_text("hi").await {
        Err(RelayError::ModelApi(message)) => assert!(message.starts_with("HTTP error:"), "{}", message),
        other => panic!("expected ModelApi, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connectivity_check_sends_minimal_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/text-model:generateContent")
        .match_body(Matcher::Regex(r#""maxOutputTokens":1"#.to_string()))
        .with_status(200)
        .with_body(OK_BODY)
        .create_async()
        .await;

    let client = client_for(&server);
    assert!(client.check_connectivity().await.is_ok());
    assert_eq!(client.models(), ("text-model", "vision-model"));
    mock.assert_async().await;
}
