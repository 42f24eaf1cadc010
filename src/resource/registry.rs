//! Provider Registry
//!
//! The `lynx` provider: its own schema, configuration into a shared client,
//! and lookup of resource adapters by type name.

use super::diagnostics::Diagnostics;
use super::environment::{self, EnvironmentResource};
use super::project::{self, ProjectResource};
use super::schema::{Attribute, Schema};
use super::snapshot::{self, SnapshotResource};
use super::team::{self, TeamResource};
use super::user::{self, UserResource};
use super::Resource;
use crate::config::{LynxConfig, ENV_API_KEY, ENV_API_URL};
use crate::lynx::{LynxClient, LynxError};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Provider type name, prefix of every resource type
pub const PROVIDER_TYPE_NAME: &str = "lynx";

/// Full resource type name: `team` and `lynx_team` both give `lynx_team`
pub fn type_name(name: &str) -> String {
    let prefix = format!("{}_", PROVIDER_TYPE_NAME);
    if name.starts_with(&prefix) {
        name.to_string()
    } else {
        format!("{}{}", prefix, name)
    }
}

/// Warn when the API key would travel unencrypted to a remote host
fn warn_if_cleartext(api_url: &str, diags: &mut Diagnostics) {
    let Ok(url) = url::Url::parse(api_url) else {
        return;
    };
    let local = matches!(
        url.host_str(),
        Some("localhost") | Some("127.0.0.1") | Some("[::1]")
    );
    if url.scheme() == "http" && !local {
        diags.add_attribute_warning(
            "api_url",
            "Insecure Lynx API URL",
            format!(
                "The Lynx API URL {} uses plain HTTP, so the API key is sent unencrypted. Use https:// for remote hosts.",
                api_url
            ),
        );
    }
}

/// Provider configuration document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LynxProviderModel {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

/// The Lynx provider
#[derive(Debug, Clone)]
pub struct LynxProvider {
    version: String,
}

impl LynxProvider {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    /// Provider type name and version
    pub fn metadata(&self) -> (&'static str, &str) {
        (PROVIDER_TYPE_NAME, &self.version)
    }

    pub fn schema(&self) -> Schema {
        Schema::new("Interact with the Lynx API")
            .with_attribute("api_url", Attribute::optional_string("Lynx API URL"))
            .with_attribute(
                "api_key",
                Attribute::optional_string("Lynx API Key").sensitive(),
            )
    }

    /// Build the shared client from the provider configuration document.
    ///
    /// Values missing from the document fall back to the environment and then
    /// the config file. Nothing is sent over the network here.
    pub fn configure(&self, config: Value, diags: &mut Diagnostics) -> Option<LynxClient> {
        let data: LynxProviderModel = if config.is_null() {
            LynxProviderModel::default()
        } else {
            super::state::decode(config, diags)?
        };

        let explicit = LynxConfig {
            api_url: data.api_url,
            api_key: data.api_key,
            timeout_secs: None,
        };
        self.configure_with(LynxConfig::effective(explicit), diags)
    }

    /// Build the shared client from already merged configuration
    pub fn configure_with(&self, config: LynxConfig, diags: &mut Diagnostics) -> Option<LynxClient> {
        let mut missing = false;
        if config.api_url.as_deref().map_or(true, |v| v.trim().is_empty()) {
            missing = true;
            diags.add_attribute_error(
                "api_url",
                "Unknown Lynx API URL",
                format!(
                    "The provider cannot create the Lynx API client as there is an unknown configuration value for the Lynx API URL. \
                     Either set the value statically in the configuration, or use the {} environment variable.",
                    ENV_API_URL
                ),
            );
        }
        if config.api_key.as_deref().map_or(true, |v| v.trim().is_empty()) {
            missing = true;
            diags.add_attribute_error(
                "api_key",
                "Unknown Lynx API Key",
                format!(
                    "The provider cannot create the Lynx API client as there is an unknown configuration value for the Lynx API Key. \
                     Either set the value statically in the configuration, or use the {} environment variable.",
                    ENV_API_KEY
                ),
            );
        }
        if missing {
            return None;
        }

        let resolved = config.resolve();
        if let Ok(resolved) = &resolved {
            warn_if_cleartext(&resolved.api_url, diags);
        }

        match resolved.and_then(|resolved| resolved.client()) {
            Ok(client) => {
                tracing::info!("Configured Lynx client for {}", client.api_url());
                Some(client)
            }
            Err(LynxError::Configuration(msg)) => {
                diags.add_error("Invalid Lynx Configuration", msg);
                None
            }
            Err(err) => {
                diags.add_error("Unable to Create Lynx API Client", err.to_string());
                None
            }
        }
    }

    /// All resource adapters keyed by type name, each holding a clone of `client`
    pub fn resources(&self, client: &LynxClient) -> BTreeMap<String, Box<dyn Resource>> {
        let adapters: Vec<Box<dyn Resource>> = vec![
            Box::new(UserResource::new(client.clone())),
            Box::new(TeamResource::new(client.clone())),
            Box::new(ProjectResource::new(client.clone())),
            Box::new(EnvironmentResource::new(client.clone())),
            Box::new(SnapshotResource::new(client.clone())),
        ];

        adapters
            .into_iter()
            .map(|r| (r.metadata(PROVIDER_TYPE_NAME), r))
            .collect()
    }

    /// Look up a single resource adapter by type name (`lynx_team` or `team`)
    pub fn resource(&self, client: &LynxClient, type_name: &str) -> Option<Box<dyn Resource>> {
        self.resources(client).remove(&self::type_name(type_name))
    }

    /// Schemas of every resource keyed by type name. Needs no client.
    pub fn resource_schemas(&self) -> BTreeMap<String, Schema> {
        let schemas: [(&str, fn() -> Schema); 5] = [
            ("user", user::schema),
            ("team", team::schema),
            ("project", project::schema),
            ("environment", environment::schema),
            ("snapshot", snapshot::schema),
        ];

        schemas
            .into_iter()
            .map(|(name, schema)| (format!("{}_{}", PROVIDER_TYPE_NAME, name), schema()))
            .collect()
    }

    /// Type names of every resource the provider serves
    pub fn resource_type_names(&self) -> Vec<String> {
        self.resource_schemas().into_keys().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> LynxClient {
        LynxClient::new("http://localhost:4000/api/v1", "key").unwrap()
    }

    #[test]
    fn test_resources_registered_by_type_name() {
        let provider = LynxProvider::new("test");
        let resources = provider.resources(&client());
        let keys: Vec<&str> = resources.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "lynx_environment",
                "lynx_project",
                "lynx_snapshot",
                "lynx_team",
                "lynx_user"
            ]
        );

        assert_eq!(provider.resource_type_names(), keys);
    }

    #[test]
    fn test_resource_lookup_accepts_short_names() {
        let provider = LynxProvider::new("test");
        assert!(provider.resource(&client(), "team").is_some());
        assert!(provider.resource(&client(), "lynx_team").is_some());
        assert!(provider.resource(&client(), "cluster").is_none());
    }

    #[test]
    fn test_configure_reports_missing_values() {
        let provider = LynxProvider::new("test");
        let mut diags = Diagnostics::new();
        let client = provider.configure_with(LynxConfig::default(), &mut diags);
        assert!(client.is_none());
        let attrs: Vec<_> = diags.iter().filter_map(|d| d.attribute.clone()).collect();
        assert_eq!(attrs, vec!["api_url", "api_key"]);
    }

    #[test]
    fn test_configure_rejects_invalid_url() {
        let provider = LynxProvider::new("test");
        let mut diags = Diagnostics::new();
        let config = LynxConfig {
            api_url: Some("localhost:4000".to_string()),
            api_key: Some("key".to_string()),
            timeout_secs: None,
        };
        assert!(provider.configure_with(config, &mut diags).is_none());
        assert_eq!(
            diags.iter().next().unwrap().summary,
            "Invalid Lynx Configuration"
        );
    }

    #[test]
    fn test_configure_with_explicit_document() {
        let provider = LynxProvider::new("test");
        let mut diags = Diagnostics::new();
        let client = provider
            .configure(
                json!({"api_url": "http://lynx.example.com/api/v1/", "api_key": "k"}),
                &mut diags,
            )
            .unwrap();
        assert!(!diags.has_error());
        assert_eq!(client.api_url(), "http://lynx.example.com/api/v1");
    }

    #[test]
    fn test_configure_ignores_earlier_errors() {
        let provider = LynxProvider::new("test");
        let mut diags = Diagnostics::new();
        diags.add_error("Client Error", "from an earlier operation");

        let config = LynxConfig {
            api_url: Some("http://localhost:4000/api/v1".to_string()),
            api_key: Some("key".to_string()),
            timeout_secs: None,
        };
        assert!(provider.configure_with(config, &mut diags).is_some());
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_configure_warns_on_remote_plain_http() {
        let provider = LynxProvider::new("test");

        let mut diags = Diagnostics::new();
        let config = LynxConfig {
            api_url: Some("http://lynx.example.com/api/v1".to_string()),
            api_key: Some("key".to_string()),
            timeout_secs: None,
        };
        assert!(provider.configure_with(config, &mut diags).is_some());
        assert!(!diags.has_error());
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.severity, crate::resource::Severity::Warning);
        assert_eq!(diag.summary, "Insecure Lynx API URL");
        assert_eq!(diag.attribute.as_deref(), Some("api_url"));

        for url in ["https://lynx.example.com/api/v1", "http://127.0.0.1:4000/api/v1"] {
            let mut diags = Diagnostics::new();
            let config = LynxConfig {
                api_url: Some(url.to_string()),
                api_key: Some("key".to_string()),
                timeout_secs: None,
            };
            assert!(provider.configure_with(config, &mut diags).is_some());
            assert!(diags.is_empty(), "{} should not warn", url);
        }
    }

    #[test]
    fn test_resource_schemas_match_adapters() {
        let provider = LynxProvider::new("test");
        let resources = provider.resources(&client());
        for (name, schema) in provider.resource_schemas() {
            assert_eq!(resources[&name].schema(), schema);
            assert!(schema.attribute("id").unwrap().computed);
        }
    }

    #[test]
    fn test_provider_schema_marks_key_sensitive() {
        let provider = LynxProvider::new("dev");
        assert_eq!(provider.metadata(), ("lynx", "dev"));
        assert_eq!(provider.schema().sensitive_attributes(), vec!["api_key"]);
    }
}
