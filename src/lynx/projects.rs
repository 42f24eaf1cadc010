//! Lynx Projects
//!
//! CRUD calls for projects. A project belongs to exactly one team, referenced
//! by id.

use super::client::LynxClient;
use super::error::{LynxError, Result};
use super::model::Project;

const RESOURCE: &str = "project";

/// Create a project. `project.team.id` must be set.
pub async fn create_project(client: &LynxClient, project: &Project) -> Result<Project> {
    if project.team.as_ref().map_or(true, |t| t.id.trim().is_empty()) {
        return Err(LynxError::Validation(
            "project team id is required".to_string(),
        ));
    }
    client.post(&client.collection_url(RESOURCE), project).await
}

/// Get a project by id
pub async fn get_project(client: &LynxClient, project_id: &str) -> Result<Project> {
    client.get(&client.member_url(RESOURCE, project_id)?).await
}

/// Update a project, addressed by `project.id`
pub async fn update_project(client: &LynxClient, project: &Project) -> Result<Project> {
    client
        .put(&client.member_url(RESOURCE, &project.id)?, project)
        .await
}

/// Delete a project
pub async fn delete_project(client: &LynxClient, project_id: &str) -> Result<()> {
    client.delete(&client.member_url(RESOURCE, project_id)?).await
}
