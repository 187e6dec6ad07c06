//! # HTTP Transport
//!
//! Thin wrapper over `reqwest` that handles the three things every call
//! to the backend shares: the bearer header, the timeout, and the mapping
//! from HTTP status + error body to [`ApiError`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::session::SessionEvents;

/// Error code the backend uses for claimed-sale conflicts.
const CODE_SALE_ALREADY_RECEIPTED: &str = "SALE_ALREADY_RECEIPTED";

/// Shape of a backend error body.
///
/// All fields are optional: older endpoints send only `message`, newer
/// ones add the structured conflict fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    sale_ids: Vec<String>,
    #[serde(default)]
    receipt_numbers: Vec<String>,
}

/// HTTP client for the trading backend.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    session: Arc<dyn SessionEvents>,
}

impl HttpClient {
    /// Builds a client from configuration.
    ///
    /// ## Errors
    /// [`ApiError::Transport`] if the underlying TLS backend cannot be
    /// initialized.
    pub fn new(config: &ApiConfig, session: Arc<dyn SessionEvents>) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(HttpClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// GET a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        debug!(%url, "GET");
        let mut request = self.client.get(&url);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// PUT a JSON body.
    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ApiResult<T> {
        let url = self.url(path);
        debug!(%url, "PUT");
        let mut request = self.client.put(&url).json(body);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// PUT without a body (e.g. assign-any-transporter).
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        debug!(%url, "PUT (empty)");
        let mut request = self.client.put(&url);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// POST a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = self.url(path);
        debug!(%url, "POST");
        let mut request = self.client.post(&url).json(body);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Maps HTTP status + body to the error taxonomy, firing the
    /// session-expired callback on 401.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            return response.json().await.map_err(Into::into);
        }

        let text = response.text().await.unwrap_or_default();
        Err(self.classify_error(status, &text))
    }

    fn classify_error(&self, status: StatusCode, body: &str) -> ApiError {
        let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();
        let message = parsed
            .as_ref()
            .and_then(|b| b.message.clone())
            .unwrap_or_else(|| body.to_string());

        if status == StatusCode::UNAUTHORIZED {
            self.session.session_expired();
            return ApiError::Unauthorized;
        }

        let is_conflict_code = parsed
            .as_ref()
            .and_then(|b| b.code.as_deref())
            .map(|c| c == CODE_SALE_ALREADY_RECEIPTED)
            .unwrap_or(false);

        if status == StatusCode::CONFLICT || is_conflict_code {
            let (sale_ids, receipt_numbers) = parsed
                .map(|b| (b.sale_ids, b.receipt_numbers))
                .unwrap_or_default();
            return ApiError::Conflict {
                message,
                sale_ids,
                receipt_numbers,
            };
        }

        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::Validation(message)
            }
            _ => ApiError::Server {
                status: status.as_u16(),
                message,
            },
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::LoggingSession;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSession(AtomicUsize);

    impl SessionEvents for CountingSession {
        fn session_expired(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn client() -> HttpClient {
        HttpClient::new(
            &ApiConfig::new("http://localhost:5000/"),
            Arc::new(LoggingSession),
        )
        .unwrap()
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = client();
        assert_eq!(
            client.url("/api/supplier/orders"),
            "http://localhost:5000/api/supplier/orders"
        );
        assert_eq!(
            client.url("api/transporters/active"),
            "http://localhost:5000/api/transporters/active"
        );
    }

    #[test]
    fn test_classify_structured_conflict() {
        let client = client();
        let body = r#"{
            "success": false,
            "message": "Sales already receipted",
            "code": "SALE_ALREADY_RECEIPTED",
            "saleIds": ["s1"],
            "receiptNumbers": ["RCP-001"]
        }"#;

        let err = client.classify_error(StatusCode::CONFLICT, body);
        match err {
            ApiError::Conflict {
                sale_ids,
                receipt_numbers,
                ..
            } => {
                assert_eq!(sale_ids, vec!["s1"]);
                assert_eq!(receipt_numbers, vec!["RCP-001"]);
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_conflict_code_without_conflict_status() {
        // Some endpoints answer 400 but still carry the conflict code
        let client = client();
        let body = r#"{"message": "already receipted", "code": "SALE_ALREADY_RECEIPTED"}"#;
        let err = client.classify_error(StatusCode::BAD_REQUEST, body);
        assert!(err.is_conflict());
    }

    #[test]
    fn test_classify_unparseable_body_degrades_gracefully() {
        let client = client();
        let err = client.classify_error(StatusCode::INTERNAL_SERVER_ERROR, "<html>boom</html>");
        match err {
            ApiError::Server { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "<html>boom</html>");
            }
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[test]
    fn test_unauthorized_fires_session_callback() {
        let session = Arc::new(CountingSession(AtomicUsize::new(0)));
        let client = HttpClient::new(&ApiConfig::new("http://localhost:5000"), session.clone())
            .unwrap();

        let err = client.classify_error(StatusCode::UNAUTHORIZED, "{}");
        assert!(err.is_auth());
        assert_eq!(session.0.load(Ordering::SeqCst), 1);
    }
}
