//! `lynx_snapshot` resource
//!
//! Snapshots cannot be changed once taken. Update only re-persists the
//! planned document and never calls the API.

use super::diagnostics::Diagnostics;
use super::schema::{Attribute, Schema};
use super::state::{self, value, ReferenceModel};
use super::Resource;
use crate::lynx::model::{Snapshot, TeamRef};
use crate::lynx::{snapshots, LynxClient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// State document of a snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotResourceModel {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub record_type: Option<String>,
    #[serde(default)]
    pub record_id: Option<String>,
    #[serde(default)]
    pub team: Option<ReferenceModel>,
}

impl SnapshotResourceModel {
    fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            id: value(&self.id),
            title: value(&self.title),
            description: value(&self.description),
            record_type: value(&self.record_type),
            record_id: value(&self.record_id),
            team: Some(TeamRef::new(state::reference_id(&self.team))),
        }
    }
}

/// Schema of `lynx_snapshot`
pub fn schema() -> Schema {
    Schema::new("Snapshot resource")
        .with_attribute("title", Attribute::required_string("Snapshot's title"))
        .with_attribute(
            "description",
            Attribute::required_string("Snapshot's description"),
        )
        .with_attribute(
            "record_type",
            Attribute::required_string("Snapshot's record_type"),
        )
        .with_attribute("record_id", Attribute::required_string("Snapshot's record_id"))
        .with_attribute(
            "team",
            Attribute::required_reference("Snapshot's team", "Team identifier"),
        )
        .with_attribute("id", Attribute::computed_id("Snapshot identifier"))
}

/// Snapshot resource adapter
pub struct SnapshotResource {
    client: LynxClient,
}

impl SnapshotResource {
    pub fn new(client: LynxClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Resource for SnapshotResource {
    fn metadata(&self, provider_type_name: &str) -> String {
        format!("{}_snapshot", provider_type_name)
    }

    fn schema(&self) -> Schema {
        schema()
    }

    async fn create(&self, plan: Value, diags: &mut Diagnostics) -> Option<Value> {
        let mut data: SnapshotResourceModel = state::decode(plan, diags)?;
        let new_snapshot = data.to_snapshot();

        tracing::info!("Create a snapshot with title {}", new_snapshot.title);

        let created = match snapshots::create_snapshot(&self.client, &new_snapshot).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                state::client_error(diags, "create", "snapshot", &err);
                return None;
            }
        };

        tracing::info!("Snapshot with id {} got created", created.id);

        data.id = state::from_server(created.id);
        data.title = state::server_or(created.title, data.title.take());
        data.description = state::server_or(created.description, data.description.take());
        data.record_type = state::server_or(created.record_type, data.record_type.take());
        data.record_id = state::server_or(created.record_id, data.record_id.take());
        if let Some(team) = created.team.filter(|t| !t.id.is_empty()) {
            data.team = Some(ReferenceModel::new(team.id));
        }
        state::encode(&data, diags)
    }

    async fn read(&self, current: Value, diags: &mut Diagnostics) -> Option<Value> {
        let mut data: SnapshotResourceModel = state::decode(current, diags)?;
        let id = value(&data.id);

        tracing::info!("Read a snapshot with id {}", id);

        let snapshot = match snapshots::get_snapshot(&self.client, &id).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                state::client_error(diags, "read", "snapshot", &err);
                return None;
            }
        };

        data.title = state::from_server(snapshot.title);
        data.description = state::from_server(snapshot.description);
        data.record_type = state::from_server(snapshot.record_type);
        data.record_id = state::from_server(snapshot.record_id);
        data.team = snapshot
            .team
            .filter(|t| !t.id.is_empty())
            .map(|t| ReferenceModel::new(t.id));
        state::encode(&data, diags)
    }

    async fn update(&self, plan: Value, diags: &mut Diagnostics) -> Option<Value> {
        let data: SnapshotResourceModel = state::decode(plan, diags)?;

        tracing::info!(
            "Snapshot with id {} updated in state only",
            value(&data.id)
        );

        state::encode(&data, diags)
    }

    async fn delete(&self, current: Value, diags: &mut Diagnostics) {
        let Some(data) = state::decode::<SnapshotResourceModel>(current, diags) else {
            return;
        };
        let id = value(&data.id);

        tracing::info!("Delete a snapshot with id {}", id);

        match snapshots::delete_snapshot(&self.client, &id).await {
            Ok(()) => tracing::info!("Snapshot with id {} got deleted", id),
            Err(err) => state::client_error(diags, "delete", "snapshot", &err),
        }
    }
}
