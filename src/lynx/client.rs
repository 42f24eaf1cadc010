//! Lynx Client
//!
//! Main client for the Lynx API, combining the HTTP transport with the base
//! URL and JSON encoding of request and response bodies.

use super::error::{LynxError, Result};
use super::http::LynxHttpClient;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Main Lynx client
///
/// Constructed once from resolved configuration and handed to every resource
/// adapter. It holds no mutable state.
#[derive(Clone, Debug)]
pub struct LynxClient {
    pub http: LynxHttpClient,
    api_url: String,
}

impl LynxClient {
    /// Create a new Lynx client
    pub fn new(api_url: &str, api_key: &str) -> Result<Self> {
        Self::from_http(api_url, LynxHttpClient::new(api_key)?)
    }

    /// Create a new Lynx client with a custom request timeout
    pub fn with_timeout(api_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        Self::from_http(api_url, LynxHttpClient::with_timeout(api_key, timeout)?)
    }

    fn from_http(api_url: &str, http: LynxHttpClient) -> Result<Self> {
        let api_url = api_url.trim().trim_end_matches('/');
        if api_url.is_empty() {
            return Err(LynxError::Configuration("API URL is empty".to_string()));
        }

        Ok(Self {
            http,
            api_url: api_url.to_string(),
        })
    }

    /// Base URL every path is appended to
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    // =========================================================================
    // URL helpers
    // =========================================================================

    /// Build a full API URL from a path such as `/team`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Build a collection URL, e.g. `/team`
    pub fn collection_url(&self, resource: &str) -> String {
        self.url(&format!("/{}", resource))
    }

    /// Build a member URL, e.g. `/team/{id}`
    pub fn member_url(&self, resource: &str, id: &str) -> Result<String> {
        Ok(self.url(&format!("/{}/{}", resource, segment(resource, id)?)))
    }

    /// Build a collection URL nested under a parent, e.g. `/project/{projectId}/environment`
    pub fn nested_collection_url(
        &self,
        parent: &str,
        parent_id: &str,
        resource: &str,
    ) -> Result<String> {
        Ok(self.url(&format!(
            "/{}/{}/{}",
            parent,
            segment(parent, parent_id)?,
            resource
        )))
    }

    /// Build a member URL nested under a parent, e.g. `/project/{projectId}/environment/{id}`
    pub fn nested_member_url(
        &self,
        parent: &str,
        parent_id: &str,
        resource: &str,
        id: &str,
    ) -> Result<String> {
        Ok(self.url(&format!(
            "/{}/{}/{}/{}",
            parent,
            segment(parent, parent_id)?,
            resource,
            segment(resource, id)?
        )))
    }

    // =========================================================================
    // JSON helpers
    // =========================================================================

    /// GET a resource and decode it
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.http.send(Method::GET, url, None).await?;
        decode(&body)
    }

    /// POST a JSON body and decode the response
    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T> {
        let payload = serde_json::to_vec(body)?;
        let body = self.http.send(Method::POST, url, Some(payload)).await?;
        decode(&body)
    }

    /// PUT a JSON body and decode the response
    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T> {
        let payload = serde_json::to_vec(body)?;
        let body = self.http.send(Method::PUT, url, Some(payload)).await?;
        decode(&body)
    }

    /// DELETE a resource, discarding any response body
    pub async fn delete(&self, url: &str) -> Result<()> {
        self.http.send(Method::DELETE, url, None).await?;
        Ok(())
    }
}

/// Percent-encode an identifier as a single path segment, rejecting blank values.
/// The identifier is sent exactly as stored.
fn segment(resource: &str, id: &str) -> Result<String> {
    if id.trim().is_empty() {
        return Err(LynxError::Validation(format!("{} id is required", resource)));
    }
    Ok(urlencoding::encode(id).into_owned())
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| {
        LynxError::Serialization(format!("failed to parse response JSON: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> LynxClient {
        LynxClient::new("http://localhost:4000/api/v1/", "key").unwrap()
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        assert_eq!(client().api_url(), "http://localhost:4000/api/v1");
    }

    #[test]
    fn test_empty_url_is_configuration_error() {
        let err = LynxClient::new("  ", "key").unwrap_err();
        assert!(matches!(err, LynxError::Configuration(_)));
    }

    #[test]
    fn test_url_builders() {
        let c = client();
        assert_eq!(c.collection_url("team"), "http://localhost:4000/api/v1/team");
        assert_eq!(
            c.member_url("team", "t1").unwrap(),
            "http://localhost:4000/api/v1/team/t1"
        );
        assert_eq!(
            c.nested_collection_url("project", "p1", "environment").unwrap(),
            "http://localhost:4000/api/v1/project/p1/environment"
        );
        assert_eq!(
            c.nested_member_url("project", "p1", "environment", "e1").unwrap(),
            "http://localhost:4000/api/v1/project/p1/environment/e1"
        );
    }

    #[test]
    fn test_ids_are_encoded_as_single_segment() {
        assert_eq!(
            client().member_url("team", "a/b c").unwrap(),
            "http://localhost:4000/api/v1/team/a%2Fb%20c"
        );
    }

    #[test]
    fn test_ids_are_not_trimmed() {
        assert_eq!(
            client().member_url("team", " t1 ").unwrap(),
            "http://localhost:4000/api/v1/team/%20t1%20"
        );
    }

    #[test]
    fn test_empty_ids_fail_validation() {
        let c = client();
        assert!(matches!(
            c.member_url("team", ""),
            Err(LynxError::Validation(_))
        ));
        assert!(matches!(
            c.nested_collection_url("project", " ", "environment"),
            Err(LynxError::Validation(_))
        ));
    }
}
