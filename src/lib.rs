//! Lynx provider
//!
//! Lets an infrastructure-as-code tool manage Lynx users, teams, projects,
//! environments and snapshots through the Lynx REST API.
//!
//! - [`lynx`] - API client: transport, models and per-entity CRUD calls
//! - [`resource`] - Resource adapters mapping state documents onto the client
//! - [`config`] - Connection parameter resolution

pub mod config;
pub mod lynx;
pub mod resource;

/// Version injected at compile time via LYNX_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("LYNX_VERSION") {
    Some(v) => v,
    None => "dev",
};
