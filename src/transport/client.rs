//! HTTP client for the registration backend
//!
//! Sends the registration as `multipart/form-data` and maps the response
//! onto [`RegistrationReceipt`] or [`TransportError`]. No timeout is set;
//! a slow backend simply resolves late.

use super::{RegistrationPayload, RegistrationReceipt, RegistrationTransport, TransportError};
use crate::config::TransportConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Registration endpoint, relative to the API base
const REGISTER_PATH: &str = "/api/verification/senior/register/";

/// Used when an error response carries no readable `detail`
const DEFAULT_REJECTION_DETAIL: &str = "Failed to submit registration";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// reqwest-backed [`RegistrationTransport`]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the backend at `base_url`
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let client = Client::builder()
            .build()
            .map_err(|e| TransportError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &TransportConfig) -> Result<Self, TransportError> {
        Self::new(&config.resolved_api_base())
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, REGISTER_PATH)
    }
}

#[async_trait]
impl RegistrationTransport for HttpTransport {
    async fn submit_registration(
        &self,
        payload: RegistrationPayload,
    ) -> Result<RegistrationReceipt, TransportError> {
        let url = self.endpoint();
        let body = payload.into_multipart()?;

        tracing::debug!(%url, "posting registration");
        let response = self
            .client
            .post(&url)
            .multipart(body)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.detail)
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| DEFAULT_REJECTION_DETAIL.to_string());
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json::<RegistrationReceipt>()
            .await
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{filled_form, IdCardFile};
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn payload() -> RegistrationPayload {
        let card = IdCardFile::new("id.png", "image/png", b"\x89PNG".to_vec());
        RegistrationPayload::new(&filled_form(), card, true, true)
    }

    async fn server_responding(template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(REGISTER_PATH))
            .respond_with(template)
            .expect(1)
            .mount(&server)
            .await;
        server
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let transport = HttpTransport::new("http://localhost:8000/").unwrap();
        assert_eq!(
            transport.endpoint(),
            "http://localhost:8000/api/verification/senior/register/"
        );
    }

    #[tokio::test]
    async fn test_success_returns_receipt() {
        let server = server_responding(
            ResponseTemplate::new(201)
                .set_body_json(serde_json::json!({"id": "abc", "status": "pending"})),
        )
        .await;

        let transport = HttpTransport::new(&server.uri()).unwrap();
        let receipt = transport.submit_registration(payload()).await.unwrap();
        assert_eq!(receipt, RegistrationReceipt::new("abc", "pending"));
    }

    #[tokio::test]
    async fn test_request_is_multipart_with_all_parts() {
        let server = server_responding(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": "abc", "status": "pending"})),
        )
        .await;

        let transport = HttpTransport::new(&server.uri()).unwrap();
        transport.submit_registration(payload()).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let content_type = requests[0]
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("multipart/form-data"));

        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"full_name\"\r\n\r\nJohn Doe"));
        assert!(body.contains("name=\"branch\"\r\n\r\nBTECH"));
        assert!(body.contains("name=\"college_email_verified\"\r\n\r\ntrue"));
        assert!(body.contains("name=\"phone_verified\"\r\n\r\ntrue"));
        assert!(body.contains("name=\"id_card_image\"; filename=\"id.png\""));
        assert!(body.contains("image/png"));
    }

    #[tokio::test]
    async fn test_error_detail_is_surfaced() {
        let server = server_responding(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"detail": "duplicate student id"})),
        )
        .await;

        let transport = HttpTransport::new(&server.uri()).unwrap();
        let err = transport.submit_registration(payload()).await.unwrap_err();
        assert_eq!(
            err,
            TransportError::Rejected {
                status: 400,
                detail: "duplicate student id".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_unparsable_error_body_uses_default_detail() {
        let server =
            server_responding(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
                .await;

        let transport = HttpTransport::new(&server.uri()).unwrap();
        let err = transport.submit_registration(payload()).await.unwrap_err();
        assert_eq!(err.user_message(), Some(DEFAULT_REJECTION_DETAIL));
    }

    #[tokio::test]
    async fn test_error_body_without_detail_uses_default() {
        let server = server_responding(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"student_id": ["already exists"]})),
        )
        .await;

        let transport = HttpTransport::new(&server.uri()).unwrap();
        let err = transport.submit_registration(payload()).await.unwrap_err();
        assert_eq!(err.user_message(), Some(DEFAULT_REJECTION_DETAIL));
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_invalid_response() {
        let server =
            server_responding(ResponseTemplate::new(200).set_body_string("created")).await;

        let transport = HttpTransport::new(&server.uri()).unwrap();
        let err = transport.submit_registration(payload()).await.unwrap_err();
        assert!(matches!(err, TransportError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Reserve a free port, then release it so nothing is listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let transport = HttpTransport::new(&format!("http://127.0.0.1:{port}")).unwrap();
        let err = transport.submit_registration(payload()).await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
        assert_eq!(err.user_message(), None);
    }

    #[test]
    fn test_from_config_uses_file_value() {
        let config = TransportConfig {
            api_base: Some("http://registry.internal:9000/".to_string()),
        };
        // Environment may override the file; only assert when it is unset
        if std::env::var(crate::config::API_BASE_ENV).is_err() {
            let transport = HttpTransport::from_config(&config).unwrap();
            assert_eq!(
                transport.endpoint(),
                "http://registry.internal:9000/api/verification/senior/register/"
            );
        }
    }
}
