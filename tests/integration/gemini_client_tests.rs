//! Gemini client against a local mock server

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{TEST_API_KEY, png_bytes};
    use base64::{Engine as _, engine::general_purpose};
    use outpaint_rs::config::ProviderSettings;
    use outpaint_rs::core::prompts::ENHANCE_PROMPT;
    use outpaint_rs::core::providers::{GeminiClient, GeminiConfig, Provider};
    use outpaint_rs::{ErrorKind, ImageGenerator, ImagePayload, ProviderError};
    use serde_json::{Value, json};
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ENDPOINT: &str = "/v1beta/models/gemini-2.5-flash-image-preview:generateContent";

    fn client(server: &MockServer) -> GeminiClient {
        GeminiClient::new(GeminiConfig::default().with_base_url(server.uri())).unwrap()
    }

    fn image_response(bytes: &[u8], text: Option<&str>) -> Value {
        let mut parts = Vec::new();
        if let Some(text) = text {
            parts.push(json!({ "text": text }));
        }
        parts.push(json!({
            "inlineData": {
                "mimeType": "image/png",
                "data": general_purpose::STANDARD.encode(bytes)
            }
        }));
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": parts },
                "finishReason": "STOP"
            }]
        })
    }

    fn template() -> ImagePayload {
        ImagePayload::new(png_bytes(8, 8), "image/png")
    }

    #[tokio::test]
    async fn test_outpaint_request_and_response() {
        let server = MockServer::start().await;
        let output = png_bytes(12, 7);
        let template = template();

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .and(header("x-goog-api-key", TEST_API_KEY))
            .and(body_partial_json(json!({
                "generationConfig": { "responseModalities": ["TEXT", "IMAGE"] }
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(image_response(&output, Some("Done."))),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = client(&server)
            .outpaint(&template, "extend the scene", TEST_API_KEY)
            .await
            .unwrap();

        let image = result.image().unwrap();
        assert_eq!(image.bytes, output);
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(result.text.as_deref(), Some("Done."));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.query().is_none(), "key must not travel in the URL");

        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], "extend the scene");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(
            parts[1]["inlineData"]["data"],
            general_purpose::STANDARD.encode(&template.bytes)
        );
    }

    #[tokio::test]
    async fn test_enhance_sends_fixed_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(image_response(b"sharp", None)))
            .mount(&server)
            .await;

        let result = client(&server)
            .enhance(&template(), TEST_API_KEY)
            .await
            .unwrap();
        assert_eq!(result.image().unwrap().bytes, b"sharp".to_vec());
        assert_eq!(result.text, None);

        let requests = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], ENHANCE_PROMPT);
    }

    #[tokio::test]
    async fn test_text_to_image() {
        let server = MockServer::start().await;
        let source = png_bytes(30, 20);
        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(image_response(&source, None)))
            .mount(&server)
            .await;

        let payload = client(&server)
            .text_to_image("a red fox", TEST_API_KEY)
            .await
            .unwrap();
        assert_eq!(payload.bytes, source);
    }

    #[tokio::test]
    async fn test_text_only_response_is_no_image() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "I can't extend this picture." }] },
                    "finishReason": "STOP"
                }]
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .outpaint(&template(), "prompt", TEST_API_KEY)
            .await
            .unwrap_err();
        match err {
            ProviderError::NoImage { message, .. } => {
                assert!(message.contains("can't extend"));
            }
            other => panic!("expected NoImage, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_key_is_credential_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {
                    "code": 400,
                    "message": "API key not valid. Please pass a valid API key.",
                    "status": "INVALID_ARGUMENT",
                    "details": [{ "reason": "API_KEY_INVALID" }]
                }
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .outpaint(&template(), "prompt", "wrong-key")
            .await
            .unwrap_err();
        assert!(err.is_credential_error());
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[tokio::test]
    async fn test_permission_denied_is_credential_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let err = client(&server)
            .enhance(&template(), TEST_API_KEY)
            .await
            .unwrap_err();
        assert!(err.is_credential_error());
    }

    #[tokio::test]
    async fn test_quota_exhausted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {
                    "code": 429,
                    "message": "Resource has been exhausted",
                    "status": "RESOURCE_EXHAUSTED",
                    "details": [{ "retryDelay": "17s" }]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server)
            .outpaint(&template(), "prompt", TEST_API_KEY)
            .await
            .unwrap_err();
        assert!(!err.is_credential_error());
        assert!(matches!(err, ProviderError::RateLimit { .. }));
        assert_eq!(err.http_status(), 429);
        assert_eq!(err.kind(), ErrorKind::Generation);
    }

    #[tokio::test]
    async fn test_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
            .mount(&server)
            .await;

        let err = client(&server)
            .outpaint(&template(), "prompt", TEST_API_KEY)
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), 500);
        assert!(!err.is_credential_error());
    }

    #[tokio::test]
    async fn test_missing_credential_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client(&server)
            .outpaint(&template(), "prompt", "  ")
            .await
            .unwrap_err();
        assert!(err.is_credential_error());
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(image_response(b"late", None))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let config = GeminiConfig::default()
            .with_base_url(server.uri())
            .with_timeout(1)
            .with_connect_timeout(1);
        let err = GeminiClient::new(config)
            .unwrap()
            .outpaint(&template(), "prompt", TEST_API_KEY)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_provider_from_settings_dispatches() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(image_response(b"ok", None)))
            .expect(1)
            .mount(&server)
            .await;

        let settings = ProviderSettings {
            base_url: server.uri(),
            ..ProviderSettings::default()
        };
        let provider = Provider::from_settings(&settings).unwrap();
        let result = provider
            .outpaint(&template(), "prompt", TEST_API_KEY)
            .await
            .unwrap();
        assert_eq!(result.image().unwrap().bytes, b"ok".to_vec());
    }
}
