//! Resource adapter layer
//!
//! Translates declarative state documents into Lynx API calls and reconciles
//! remote state back into those documents. Each entity has one adapter
//! implementing [`Resource`].
//!
//! # Architecture
//!
//! - [`registry`] - The `lynx` provider: schema, configuration, adapter lookup
//! - [`user`], [`team`], [`project`], [`environment`], [`snapshot`] - per-entity adapters
//! - [`diagnostics`] - Errors and warnings reported back to the host
//! - [`schema`] - Attribute descriptions for documentation and validation
//!
//! # Example
//!
//! ```no_run
//! use lynx_provider::resource::{Diagnostics, LynxProvider, Resource};
//! use serde_json::json;
//!
//! # async fn example() {
//! let provider = LynxProvider::new("dev");
//! let mut diags = Diagnostics::new();
//! let Some(client) = provider.configure(json!({}), &mut diags) else {
//!     return;
//! };
//! let team = provider.resource(&client, "lynx_team").unwrap();
//! let _state = team
//!     .create(json!({"name": "core", "slug": "core", "members": ["u1"]}), &mut diags)
//!     .await;
//! # }
//! ```

use async_trait::async_trait;
use serde_json::Value;

pub mod diagnostics;
pub mod environment;
pub mod project;
pub mod registry;
pub mod schema;
pub mod snapshot;
mod state;
pub mod team;
pub mod user;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use registry::{LynxProvider, PROVIDER_TYPE_NAME};
pub use schema::{Attribute, AttributeType, Schema};
pub use state::ReferenceModel;

/// A resource type served by the provider.
///
/// Every operation either succeeds completely or appends an error to `diags`
/// and leaves the state untouched. Returned documents replace the stored
/// state; `None` means nothing is persisted.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Full type name, e.g. `lynx_team`
    fn metadata(&self, provider_type_name: &str) -> String;

    fn schema(&self) -> Schema;

    /// Create the remote entity described by `plan`
    async fn create(&self, plan: Value, diags: &mut Diagnostics) -> Option<Value>;

    /// Refresh `current` from the remote entity it identifies
    async fn read(&self, current: Value, diags: &mut Diagnostics) -> Option<Value>;

    /// Apply `plan` to the remote entity
    async fn update(&self, plan: Value, diags: &mut Diagnostics) -> Option<Value>;

    /// Remove the remote entity identified by `current`
    async fn delete(&self, current: Value, diags: &mut Diagnostics);

    /// Seed a state document from an externally supplied identifier.
    /// The next read fills in everything else.
    fn import_state(&self, id: &str, diags: &mut Diagnostics) -> Option<Value> {
        if id.trim().is_empty() {
            diags.add_error(
                "Invalid Import Identifier",
                "An identifier is required to import a resource",
            );
            return None;
        }
        Some(serde_json::json!({ "id": id }))
    }
}
