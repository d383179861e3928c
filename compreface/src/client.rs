//! HTTP client for the CompreFace verification service.

use std::time::Duration;

use bytes::Bytes;
use reqwest::{multipart, Body, Client as ReqwestClient};

use crate::error::{ComprefaceError, Result};
use crate::types::VerifyResponse;

/// Sub-path of the verification endpoint, relative to the base URL.
const VERIFY_PATH: &str = "/api/v1/verification/verify";

/// Request timeout. Verification of a single pair is quick; a stuck call
/// should not hold a batch slot open indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the CompreFace verification endpoint.
///
/// Holds a connection pool; clone-free reuse across calls is intended
/// (pass `&VerifyClient` around).
pub struct VerifyClient {
    client: ReqwestClient,
    base_url: String,
    api_key: String,
}

impl VerifyClient {
    /// Creates a new client. A trailing slash on `base_url` is trimmed.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        if base_url.is_empty() {
            return Err(ComprefaceError::Config("empty base URL".into()));
        }
        if api_key.is_empty() {
            return Err(ComprefaceError::Config("empty API key".into()));
        }

        let client = ReqwestClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Verifies whether `source` and `target` contain the same face.
    ///
    /// Both arguments are encoded image bytes. The images are sent as a
    /// two-part multipart body (`source_image`, `target_image`),
    /// authenticated with the `x-api-key` header.
    pub async fn verify(&self, source: Bytes, target: Bytes) -> Result<VerifyResponse> {
        let url = format!("{}{}", self.base_url, VERIFY_PATH);

        let form = multipart::Form::new()
            .part(
                "source_image",
                multipart::Part::stream(Body::from(source)).file_name("source.jpg"),
            )
            .part(
                "target_image",
                multipart::Part::stream(Body::from(target)).file_name("target.jpg"),
            );

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ComprefaceError::Api {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).to_string(),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::DefaultBodyLimit;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    use super::*;

    /// Starts a mock verification service and returns its base URL.
    async fn start_mock() -> String {
        async fn verify(headers: HeaderMap) -> (StatusCode, Json<serde_json::Value>) {
            if headers.get("x-api-key").map(|v| v.as_bytes()) != Some(b"good-key") {
                return (StatusCode::UNAUTHORIZED, Json(json!({"message": "bad key"})));
            }
            (
                StatusCode::OK,
                Json(json!({
                    "result": [
                        {"face_matches": [{"similarity": 0.95}]}
                    ]
                })),
            )
        }

        let app = Router::new()
            .route("/api/v1/verification/verify", post(verify))
            .layer(DefaultBodyLimit::max(16 * 1024 * 1024));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn verify_parses_similarity() {
        let base = start_mock().await;
        let client = VerifyClient::new(&base, "good-key").unwrap();

        let resp = client
            .verify(Bytes::from_static(b"probe"), Bytes::from_static(b"photo"))
            .await
            .unwrap();
        assert_eq!(resp.max_similarity(), Some(0.95));
        assert!(resp.has_match(0.80));
    }

    #[tokio::test]
    async fn verify_rejected_key_is_api_error() {
        let base = start_mock().await;
        let client = VerifyClient::new(&base, "wrong-key").unwrap();

        let err = client
            .verify(Bytes::from_static(b"probe"), Bytes::from_static(b"photo"))
            .await
            .unwrap_err();
        match err {
            ComprefaceError::Api { status, .. } => assert_eq!(status, 401),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn new_trims_trailing_slash() {
        let client = VerifyClient::new("http://host:8000/", "key").unwrap();
        assert_eq!(client.base_url, "http://host:8000");
    }

    #[test]
    fn new_rejects_empty_params() {
        assert!(VerifyClient::new("", "key").is_err());
        assert!(VerifyClient::new("http://host", "").is_err());
    }
}
