//! E2E tests for the Gemini image model
//!
//! These tests make real API calls and require GEMINI_API_KEY.
//! Run with: GEMINI_API_KEY=xxx cargo test -- --ignored gemini

#[cfg(test)]
mod tests {
    use crate::common::fixtures::png_source;
    use crate::skip_without_env;
    use outpaint_rs::core::providers::{GeminiClient, GeminiConfig};
    use outpaint_rs::{HistoryStore, KeyValueStore, SessionController};

    /// Full flow: upload, outpaint, enhance
    #[tokio::test]
    #[ignore]
    async fn test_gemini_outpaint_and_enhance() {
        skip_without_env!("GEMINI_API_KEY");

        let client = GeminiClient::new(GeminiConfig::default()).expect("Failed to create client");
        let history = HistoryStore::new(KeyValueStore::memory());
        let mut session = SessionController::open(client, history).await;
        session.set_credential(std::env::var("GEMINI_API_KEY").ok());

        session
            .upload_source(png_source(400, 400))
            .await
            .expect("upload");
        session.set_prompt("a red barn in a wide green field under a blue sky");

        let result = session.generate_panorama().await;
        assert!(result.is_ok(), "Gemini outpaint failed: {:?}", result.err());
        assert_eq!(session.history().len(), 1);

        let enhanced = session.enhance_result().await;
        assert!(enhanced.is_ok(), "Gemini enhance failed: {:?}", enhanced.err());
        assert!(enhanced.unwrap().image().is_ok());
    }

    /// A bogus key is reported as a credential problem
    #[tokio::test]
    #[ignore]
    async fn test_gemini_rejects_bad_key() {
        skip_without_env!("GEMINI_API_KEY");

        let client = GeminiClient::new(GeminiConfig::default()).expect("Failed to create client");
        let mut session = SessionController::open(client, HistoryStore::new(KeyValueStore::memory())).await;
        session.set_credential(Some("AIzaSyNOTAREALKEY000000000000000000000".to_string()));
        session.upload_source(png_source(64, 64)).await.expect("upload");
        session.set_prompt("mountains");

        let err = session.generate_panorama().await.unwrap_err();
        assert!(err.is_credential_error(), "unexpected error: {:?}", err);
    }
}
