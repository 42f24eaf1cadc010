//! Lynx Environments
//!
//! Environments only exist under a project, so every call is addressed by the
//! parent project id as well.

use super::client::LynxClient;
use super::error::Result;
use super::model::Environment;

const PARENT: &str = "project";
const RESOURCE: &str = "environment";

/// Create an environment under `environment.project.id`
pub async fn create_environment(
    client: &LynxClient,
    environment: &Environment,
) -> Result<Environment> {
    let url = client.nested_collection_url(PARENT, environment.project_id(), RESOURCE)?;
    client.post(&url, environment).await
}

/// Get an environment of a project
pub async fn get_environment(
    client: &LynxClient,
    project_id: &str,
    environment_id: &str,
) -> Result<Environment> {
    let url = client.nested_member_url(PARENT, project_id, RESOURCE, environment_id)?;
    client.get(&url).await
}

/// Update an environment, addressed by `environment.project.id` and `environment.id`
pub async fn update_environment(
    client: &LynxClient,
    environment: &Environment,
) -> Result<Environment> {
    let url = client.nested_member_url(
        PARENT,
        environment.project_id(),
        RESOURCE,
        &environment.id,
    )?;
    client.put(&url, environment).await
}

/// Delete an environment of a project
pub async fn delete_environment(
    client: &LynxClient,
    project_id: &str,
    environment_id: &str,
) -> Result<()> {
    let url = client.nested_member_url(PARENT, project_id, RESOURCE, environment_id)?;
    client.delete(&url).await
}
