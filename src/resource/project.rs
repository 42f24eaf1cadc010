//! `lynx_project` resource

use super::diagnostics::Diagnostics;
use super::schema::{Attribute, Schema};
use super::state::{self, value, ReferenceModel};
use super::Resource;
use crate::lynx::model::{Project, TeamRef};
use crate::lynx::{projects, LynxClient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// State document of a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectResourceModel {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub team: Option<ReferenceModel>,
}

impl ProjectResourceModel {
    fn to_project(&self) -> Project {
        Project {
            id: value(&self.id),
            name: value(&self.name),
            slug: value(&self.slug),
            description: value(&self.description),
            team: Some(TeamRef::new(state::reference_id(&self.team))),
        }
    }

    fn apply(&mut self, project: Project) {
        self.name = state::server_or(project.name, self.name.take());
        self.slug = state::server_or(project.slug, self.slug.take());
        self.description = state::server_or(project.description, self.description.take());
        if let Some(team) = project.team.filter(|t| !t.id.is_empty()) {
            self.team = Some(ReferenceModel::new(team.id));
        }
    }
}

/// Schema of `lynx_project`
pub fn schema() -> Schema {
    Schema::new("Project resource")
        .with_attribute("name", Attribute::required_string("Project's name"))
        .with_attribute("slug", Attribute::required_string("Project's slug"))
        .with_attribute(
            "description",
            Attribute::optional_string("Project's description"),
        )
        .with_attribute(
            "team",
            Attribute::required_reference("Project's team", "Team identifier"),
        )
        .with_attribute("id", Attribute::computed_id("Project identifier"))
}

/// Project resource adapter
pub struct ProjectResource {
    client: LynxClient,
}

impl ProjectResource {
    pub fn new(client: LynxClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Resource for ProjectResource {
    fn metadata(&self, provider_type_name: &str) -> String {
        format!("{}_project", provider_type_name)
    }

    fn schema(&self) -> Schema {
        schema()
    }

    async fn create(&self, plan: Value, diags: &mut Diagnostics) -> Option<Value> {
        let mut data: ProjectResourceModel = state::decode(plan, diags)?;
        let new_project = data.to_project();

        tracing::info!("Create a project with name {}", new_project.name);

        let created = match projects::create_project(&self.client, &new_project).await {
            Ok(project) => project,
            Err(err) => {
                state::client_error(diags, "create", "project", &err);
                return None;
            }
        };

        tracing::info!("Project with id {} got created", created.id);

        data.id = state::from_server(created.id.clone());
        data.apply(created);
        state::encode(&data, diags)
    }

    async fn read(&self, current: Value, diags: &mut Diagnostics) -> Option<Value> {
        let mut data: ProjectResourceModel = state::decode(current, diags)?;
        let id = value(&data.id);

        tracing::info!("Read a project with id {}", id);

        let project = match projects::get_project(&self.client, &id).await {
            Ok(project) => project,
            Err(err) => {
                state::client_error(diags, "read", "project", &err);
                return None;
            }
        };

        data.name = state::from_server(project.name);
        data.slug = state::from_server(project.slug);
        data.description = state::from_server(project.description);
        data.team = project
            .team
            .filter(|t| !t.id.is_empty())
            .map(|t| ReferenceModel::new(t.id));
        state::encode(&data, diags)
    }

    async fn update(&self, plan: Value, diags: &mut Diagnostics) -> Option<Value> {
        let mut data: ProjectResourceModel = state::decode(plan, diags)?;
        let updated_project = data.to_project();

        tracing::info!("Update a project with id {}", updated_project.id);

        let updated = match projects::update_project(&self.client, &updated_project).await {
            Ok(project) => project,
            Err(err) => {
                state::client_error(diags, "update", "project", &err);
                return None;
            }
        };

        tracing::info!("Project with id {} got updated", updated_project.id);

        data.apply(updated);
        state::encode(&data, diags)
    }

    async fn delete(&self, current: Value, diags: &mut Diagnostics) {
        let Some(data) = state::decode::<ProjectResourceModel>(current, diags) else {
            return;
        };
        let id = value(&data.id);

        tracing::info!("Delete a project with id {}", id);

        match projects::delete_project(&self.client, &id).await {
            Ok(()) => tracing::info!("Project with id {} got deleted", id),
            Err(err) => state::client_error(diags, "delete", "project", &err),
        }
    }
}
