//! `lynx_team` resource

use super::diagnostics::Diagnostics;
use super::schema::{Attribute, Schema};
use super::state::{self, value};
use super::Resource;
use crate::lynx::model::Team;
use crate::lynx::{teams, LynxClient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// State document of a team
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamResourceModel {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub members: Option<Vec<String>>,
}

impl TeamResourceModel {
    fn to_team(&self) -> Team {
        Team {
            id: value(&self.id),
            name: value(&self.name),
            slug: value(&self.slug),
            description: value(&self.description),
            members: teams::normalize_members(self.members.iter().flatten()),
        }
    }

    fn apply(&mut self, team: Team) {
        self.name = state::server_or(team.name, self.name.take());
        self.slug = state::server_or(team.slug, self.slug.take());
        self.description = state::server_or(team.description, self.description.take());
        if !team.members.is_empty() {
            self.members = Some(team.members);
        }
    }
}

/// Schema of `lynx_team`
pub fn schema() -> Schema {
    Schema::new("Team resource")
        .with_attribute("name", Attribute::required_string("Team's name"))
        .with_attribute("slug", Attribute::required_string("Team's slug"))
        .with_attribute("description", Attribute::optional_string("Team's description"))
        .with_attribute("members", Attribute::required_string_list("Team's members"))
        .with_attribute("id", Attribute::computed_id("Team identifier"))
}

/// Team resource adapter
pub struct TeamResource {
    client: LynxClient,
}

impl TeamResource {
    pub fn new(client: LynxClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Resource for TeamResource {
    fn metadata(&self, provider_type_name: &str) -> String {
        format!("{}_team", provider_type_name)
    }

    fn schema(&self) -> Schema {
        schema()
    }

    async fn create(&self, plan: Value, diags: &mut Diagnostics) -> Option<Value> {
        let mut data: TeamResourceModel = state::decode(plan, diags)?;
        let new_team = data.to_team();

        tracing::info!("Create a team with name {}", new_team.name);

        let created = match teams::create_team(&self.client, &new_team).await {
            Ok(team) => team,
            Err(err) => {
                state::client_error(diags, "create", "team", &err);
                return None;
            }
        };

        tracing::info!("Team with id {} got created", created.id);

        data.id = state::from_server(created.id.clone());
        data.apply(created);
        state::encode(&data, diags)
    }

    async fn read(&self, current: Value, diags: &mut Diagnostics) -> Option<Value> {
        let mut data: TeamResourceModel = state::decode(current, diags)?;
        let id = value(&data.id);

        tracing::info!("Read a team with id {}", id);

        let team = match teams::get_team(&self.client, &id).await {
            Ok(team) => team,
            Err(err) => {
                state::client_error(diags, "read", "team", &err);
                return None;
            }
        };

        data.name = state::from_server(team.name);
        data.slug = state::from_server(team.slug);
        data.description = state::from_server(team.description);
        data.members = Some(team.members);
        state::encode(&data, diags)
    }

    async fn update(&self, plan: Value, diags: &mut Diagnostics) -> Option<Value> {
        let mut data: TeamResourceModel = state::decode(plan, diags)?;
        let updated_team = data.to_team();

        tracing::info!("Update a team with id {}", updated_team.id);

        let updated = match teams::update_team(&self.client, &updated_team).await {
            Ok(team) => team,
            Err(err) => {
                state::client_error(diags, "update", "team", &err);
                return None;
            }
        };

        tracing::info!("Team with id {} got updated", updated_team.id);

        data.apply(updated);
        state::encode(&data, diags)
    }

    async fn delete(&self, current: Value, diags: &mut Diagnostics) {
        let Some(data) = state::decode::<TeamResourceModel>(current, diags) else {
            return;
        };
        let id = value(&data.id);

        tracing::info!("Delete a team with id {}", id);

        match teams::delete_team(&self.client, &id).await {
            Ok(()) => tracing::info!("Team with id {} got deleted", id),
            Err(err) => state::client_error(diags, "delete", "team", &err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_to_team_normalizes_members() {
        let data = TeamResourceModel {
            name: Some("core".to_string()),
            members: Some(vec!["\"u1\"".to_string(), "u2".to_string()]),
            ..Default::default()
        };
        let team = data.to_team();
        assert_eq!(team.members, vec!["u1", "u2"]);
        assert_eq!(team.id, "");
    }

    #[test]
    fn test_apply_keeps_planned_values_the_server_omits() {
        let mut data = TeamResourceModel {
            name: Some("core".to_string()),
            description: Some("Core team".to_string()),
            members: Some(vec!["u1".to_string()]),
            ..Default::default()
        };
        data.apply(Team {
            id: "t1".to_string(),
            name: "Core".to_string(),
            ..Default::default()
        });
        assert_eq!(data.name.as_deref(), Some("Core"));
        assert_eq!(data.description.as_deref(), Some("Core team"));
        assert_eq!(data.members, Some(vec!["u1".to_string()]));
    }
}
