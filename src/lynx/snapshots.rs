//! Lynx Snapshots
//!
//! Snapshots are immutable once taken: the API exposes create, read and
//! delete only.

use super::client::LynxClient;
use super::error::{LynxError, Result};
use super::model::Snapshot;

const RESOURCE: &str = "snapshot";

/// Take a snapshot. Team, record type and record id are required.
pub async fn create_snapshot(client: &LynxClient, snapshot: &Snapshot) -> Result<Snapshot> {
    if snapshot.team.as_ref().map_or(true, |t| t.id.trim().is_empty()) {
        return Err(LynxError::Validation(
            "snapshot team id is required".to_string(),
        ));
    }
    if snapshot.record_type.trim().is_empty() || snapshot.record_id.trim().is_empty() {
        return Err(LynxError::Validation(
            "snapshot record_type and record_id are required".to_string(),
        ));
    }
    client.post(&client.collection_url(RESOURCE), snapshot).await
}

/// Get a snapshot by id
pub async fn get_snapshot(client: &LynxClient, snapshot_id: &str) -> Result<Snapshot> {
    client.get(&client.member_url(RESOURCE, snapshot_id)?).await
}

/// Delete a snapshot
pub async fn delete_snapshot(client: &LynxClient, snapshot_id: &str) -> Result<()> {
    client.delete(&client.member_url(RESOURCE, snapshot_id)?).await
}
