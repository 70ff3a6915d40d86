pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::reviews::handlers;
use crate::state::AppState;

/// API routes plus the static upload page as fallback for every other path.
pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/health", get(health::health_handler))
        // Reviews API
        .route("/api/generate", post(handlers::handle_generate))
        .route(
            "/api/generate-from-file",
            post(handlers::handle_generate_from_file),
        )
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::errors::AppError;
    use crate::extraction::DocumentExtractor;
    use crate::reviews::generator::{GenerationParams, ReviewGenerator};

    struct StubGenerator;

    #[async_trait]
    impl ReviewGenerator for StubGenerator {
        async fn generate(&self, _: &str, _: &GenerationParams) -> Result<String, AppError> {
            Ok("1. 커피가 진하고 맛있었어요.\n2. 직원분이 친절했습니다\n3. 자리가 넉넉했다".to_string())
        }
    }

    struct StubExtractor;

    impl DocumentExtractor for StubExtractor {
        fn extract_text(&self, bytes: &[u8], max_chars: usize) -> Result<String, AppError> {
            if bytes.starts_with(b"%PDF") {
                Ok("동네 카페, 핸드드립 커피".chars().take(max_chars).collect())
            } else {
                Err(AppError::Extraction("not a pdf".to_string()))
            }
        }
    }

    fn test_config() -> Config {
        Config {
            openai_api_key: "test-key".to_string(),
            openai_base_url: "http://localhost:0/v1".to_string(),
            default_model: "gpt-4o-mini".to_string(),
            port: 3000,
            rust_log: "info".to_string(),
            static_dir: "public".to_string(),
            max_summary_chars: 3000,
            max_upload_bytes: 1024 * 1024,
            request_timeout_secs: 30,
            llm_timeout_secs: 30,
        }
    }

    fn test_app() -> Router {
        build_router(AppState {
            generator: Arc::new(StubGenerator),
            extractor: Arc::new(StubExtractor),
            config: test_config(),
        })
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    const BOUNDARY: &str = "review-api-test-boundary";

    fn multipart_request(fields: &[(&str, &str)], file: Option<&[u8]>) -> Request<Body> {
        let mut body: Vec<u8> = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some(bytes) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"intro.pdf\"\r\nContent-Type: application/pdf\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/generate-from-file")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_routes() {
        for uri in ["/api/health", "/health"] {
            let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
            let response = test_app().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let body = body_json(response).await;
            assert_eq!(body["ok"], true);
            assert_eq!(body["service"], "review-api");
        }
    }

    #[tokio::test]
    async fn test_generate_returns_reviews_and_options() {
        let request = json_request(
            "/api/generate",
            json!({ "summary": "동네 카페", "n": 2, "emoji": false }),
        );
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(
            body["reviews"],
            json!(["커피가 진하고 맛있었어요", "직원분이 친절했습니다"])
        );
        assert_eq!(body["options"]["emoji"], false);
        assert_eq!(body["options"]["model"], "gpt-4o-mini");
        assert_eq!(body["options"]["maxFraction"], 0.15);
    }

    #[tokio::test]
    async fn test_generate_without_summary_is_input_missing() {
        for payload in [json!({ "n": 3 }), json!({ "summary": "   " })] {
            let response = test_app()
                .oneshot(json_request("/api/generate", payload))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = body_json(response).await;
            assert_eq!(body["error"]["code"], "INPUT_MISSING");
        }
    }

    #[tokio::test]
    async fn test_generate_rejects_inverted_fractions() {
        let request = json_request(
            "/api/generate",
            json!({ "summary": "카페", "minFraction": 0.5, "maxFraction": 0.2 }),
        );
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_generate_from_file_returns_summary() {
        let request = multipart_request(&[("n", "3"), ("emoji", "false")], Some(b"%PDF-1.4 fake".as_slice()));
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["summary"], "동네 카페, 핸드드립 커피");
        assert_eq!(body["reviews"].as_array().unwrap().len(), 3);
        assert_eq!(body["options"]["emoji"], false);
    }

    #[tokio::test]
    async fn test_generate_from_file_without_file_is_input_missing() {
        let response = test_app()
            .oneshot(multipart_request(&[("n", "3")], None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INPUT_MISSING");
    }

    #[tokio::test]
    async fn test_generate_from_file_bad_number_is_validation_error() {
        let request = multipart_request(&[("n", "many")], Some(b"%PDF-1.4 fake".as_slice()));
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_extraction_failure_is_server_error() {
        let request = multipart_request(&[], Some(b"plain text, not a pdf".as_slice()));
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "EXTRACTION_FAILED");
    }
}
