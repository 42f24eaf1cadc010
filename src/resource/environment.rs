//! `lynx_environment` resource
//!
//! Environments are addressed through their project, so every operation
//! needs `project.id` alongside the environment's own id.

use super::diagnostics::Diagnostics;
use super::schema::{Attribute, Schema};
use super::state::{self, value, ReferenceModel};
use super::Resource;
use crate::lynx::model::{Environment, ProjectRef};
use crate::lynx::{environments, LynxClient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// State document of an environment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentResourceModel {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub project: Option<ReferenceModel>,
}

impl EnvironmentResourceModel {
    fn project_id(&self) -> String {
        state::reference_id(&self.project).to_string()
    }

    fn to_environment(&self) -> Environment {
        Environment {
            id: value(&self.id),
            name: value(&self.name),
            slug: value(&self.slug),
            username: value(&self.username),
            secret: value(&self.secret),
            project: Some(ProjectRef::new(self.project_id())),
        }
    }

    fn apply(&mut self, environment: Environment) {
        self.name = state::server_or(environment.name, self.name.take());
        self.slug = state::server_or(environment.slug, self.slug.take());
        self.username = state::server_or(environment.username, self.username.take());
        self.secret = state::server_or(environment.secret, self.secret.take());
        if let Some(project) = environment.project.filter(|p| !p.id.is_empty()) {
            self.project = Some(ReferenceModel::new(project.id));
        }
    }
}

/// Schema of `lynx_environment`
pub fn schema() -> Schema {
    Schema::new("Environment resource")
        .with_attribute("name", Attribute::required_string("Environment's name"))
        .with_attribute("slug", Attribute::required_string("Environment's slug"))
        .with_attribute(
            "username",
            Attribute::required_string("Environment's username").sensitive(),
        )
        .with_attribute(
            "secret",
            Attribute::required_string("Environment's secret").sensitive(),
        )
        .with_attribute(
            "project",
            Attribute::required_reference("Environment's project", "Project identifier"),
        )
        .with_attribute("id", Attribute::computed_id("Environment identifier"))
}

/// Environment resource adapter
pub struct EnvironmentResource {
    client: LynxClient,
}

impl EnvironmentResource {
    pub fn new(client: LynxClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Resource for EnvironmentResource {
    fn metadata(&self, provider_type_name: &str) -> String {
        format!("{}_environment", provider_type_name)
    }

    fn schema(&self) -> Schema {
        schema()
    }

    async fn create(&self, plan: Value, diags: &mut Diagnostics) -> Option<Value> {
        let mut data: EnvironmentResourceModel = state::decode(plan, diags)?;
        let new_environment = data.to_environment();

        tracing::info!("Create an environment with name {}", new_environment.name);

        let created =
            match environments::create_environment(&self.client, &new_environment).await {
                Ok(environment) => environment,
                Err(err) => {
                    state::client_error(diags, "create", "environment", &err);
                    return None;
                }
            };

        tracing::info!("Environment with id {} got created", created.id);

        data.id = state::from_server(created.id.clone());
        data.apply(created);
        state::encode(&data, diags)
    }

    async fn read(&self, current: Value, diags: &mut Diagnostics) -> Option<Value> {
        let mut data: EnvironmentResourceModel = state::decode(current, diags)?;
        let id = value(&data.id);
        let project_id = data.project_id();

        tracing::info!("Read an environment with id {}", id);

        let environment =
            match environments::get_environment(&self.client, &project_id, &id).await {
                Ok(environment) => environment,
                Err(err) => {
                    state::client_error(diags, "read", "environment", &err);
                    return None;
                }
            };

        data.name = state::from_server(environment.name);
        data.slug = state::from_server(environment.slug);
        // Credentials are kept when the server leaves them out of the response
        data.username = state::server_or(environment.username, data.username.take());
        data.secret = state::server_or(environment.secret, data.secret.take());
        // Older API versions omit the parent on nested reads
        data.project = Some(ReferenceModel::new(
            environment
                .project
                .map(|p| p.id)
                .filter(|id| !id.is_empty())
                .unwrap_or(project_id),
        ));
        state::encode(&data, diags)
    }

    async fn update(&self, plan: Value, diags: &mut Diagnostics) -> Option<Value> {
        let mut data: EnvironmentResourceModel = state::decode(plan, diags)?;
        let updated_environment = data.to_environment();

        tracing::info!("Update an environment with id {}", updated_environment.id);

        let updated =
            match environments::update_environment(&self.client, &updated_environment).await {
                Ok(environment) => environment,
                Err(err) => {
                    state::client_error(diags, "update", "environment", &err);
                    return None;
                }
            };

        tracing::info!("Environment with id {} got updated", updated_environment.id);

        data.apply(updated);
        state::encode(&data, diags)
    }

    async fn delete(&self, current: Value, diags: &mut Diagnostics) {
        let Some(data) = state::decode::<EnvironmentResourceModel>(current, diags) else {
            return;
        };
        let id = value(&data.id);

        tracing::info!("Delete an environment with id {}", id);

        match environments::delete_environment(&self.client, &data.project_id(), &id).await {
            Ok(()) => tracing::info!("Environment with id {} got deleted", id),
            Err(err) => state::client_error(diags, "delete", "environment", &err),
        }
    }

    /// Accepts `<project_id>/<environment_id>` so the next read can address
    /// the environment; a bare id is passed through unchanged.
    fn import_state(&self, id: &str, diags: &mut Diagnostics) -> Option<Value> {
        let parts: Vec<&str> = id.split('/').collect();
        if parts.len() > 2 || parts.iter().any(|part| part.trim().is_empty()) {
            diags.add_error(
                "Invalid Import Identifier",
                format!(
                    "Expected <project_id>/<environment_id> or <environment_id>, got '{}'",
                    id
                ),
            );
            return None;
        }

        let data = match id.split_once('/') {
            Some((project_id, environment_id)) => EnvironmentResourceModel {
                id: Some(environment_id.to_string()),
                project: Some(ReferenceModel::new(project_id)),
                ..Default::default()
            },
            None => EnvironmentResourceModel {
                id: Some(id.to_string()),
                ..Default::default()
            },
        };
        state::encode(&data, diags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource() -> EnvironmentResource {
        EnvironmentResource::new(LynxClient::new("http://localhost:4000", "key").unwrap())
    }

    #[test]
    fn test_import_compound_id() {
        let mut diags = Diagnostics::new();
        let doc = resource().import_state("p1/e1", &mut diags).unwrap();
        assert_eq!(doc["id"], "e1");
        assert_eq!(doc["project"]["id"], "p1");
    }

    #[test]
    fn test_import_bare_id() {
        let mut diags = Diagnostics::new();
        let doc = resource().import_state("e1", &mut diags).unwrap();
        assert_eq!(doc["id"], "e1");
        assert!(doc["project"].is_null());
    }

    #[test]
    fn test_import_rejects_malformed_ids() {
        for id in ["", "p1/", "/e1", "p1/e1/extra", "p1//e1"] {
            let mut diags = Diagnostics::new();
            assert!(resource().import_state(id, &mut diags).is_none());
            assert!(diags.has_error());
        }
    }

    #[test]
    fn test_secret_is_sensitive() {
        let schema = resource().schema();
        assert_eq!(schema.sensitive_attributes(), vec!["secret", "username"]);
    }
}
