//! HTTP transport for Lynx REST API calls

use super::error::{LynxError, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use std::time::Duration;
use tracing::Instrument;

/// Header carrying the API key on every request
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Client-side timeout applied to the whole request/response cycle
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper for Lynx API calls
///
/// Holds only immutable state, so clones can be shared freely across tasks.
#[derive(Clone)]
pub struct LynxHttpClient {
    client: Client,
    timeout: Duration,
}

impl std::fmt::Debug for LynxHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The default headers hold the API key
        f.debug_struct("LynxHttpClient")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl LynxHttpClient {
    /// Create a new HTTP client with the default timeout
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    /// Create a new HTTP client with a custom timeout
    pub fn with_timeout(api_key: &str, timeout: Duration) -> Result<Self> {
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| LynxError::Configuration(format!("invalid API key: {}", e)))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(concat!("lynx-provider/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| LynxError::Configuration(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    /// Configured request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send a request and return the full response body.
    ///
    /// Any status >= 400 becomes [`LynxError::Api`] with the body passed through verbatim.
    pub async fn send(&self, method: Method, url: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>> {
        let request_id = uuid::Uuid::new_v4();
        let span = tracing::debug_span!("lynx_request", %method, url, %request_id);

        async move {
            tracing::debug!("{} {}", method, url);

            let mut request = self.client.request(method, url);
            if let Some(body) = body {
                request = request.body(body);
            }

            let response = request.send().await?;

            let status = response.status();
            let bytes = response.bytes().await?;

            if status.as_u16() >= 400 {
                let body = String::from_utf8_lossy(&bytes).into_owned();
                // Only log sanitized/truncated error body to avoid leaking sensitive data
                tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
                return Err(LynxError::Api {
                    status: status.as_u16(),
                    body,
                });
            }

            tracing::debug!("{} ({} bytes)", status, bytes.len());
            Ok(bytes.to_vec())
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"x".repeat(MAX_LOG_BODY_LENGTH)));
        assert!(sanitized.contains("500 bytes total"));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("bad\nrequest\t!"), "badrequest!");
    }

    #[test]
    fn test_sanitize_respects_char_boundaries() {
        let body = "é".repeat(150);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.contains("300 bytes total"));
    }

    #[test]
    fn test_invalid_api_key_is_configuration_error() {
        let err = LynxHttpClient::new("bad\nkey").unwrap_err();
        assert!(matches!(err, LynxError::Configuration(_)));
    }

    #[test]
    fn test_default_timeout() {
        let client = LynxHttpClient::new("key").unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(10));
    }
}
