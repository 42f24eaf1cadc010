//! Lynx API interaction module
//!
//! This module provides the client side of the Lynx REST API: transport,
//! domain models and one set of CRUD calls per entity.
//!
//! # Module Structure
//!
//! - [`http`] - HTTP transport (API key header, timeout, status classification)
//! - [`client`] - Main Lynx client: URL building and JSON encoding
//! - [`model`] - Domain models shared by every call
//! - [`users`], [`teams`], [`projects`], [`environments`], [`snapshots`] - per-entity calls
//!
//! # Example
//!
//! ```no_run
//! use lynx_provider::lynx::{client::LynxClient, model::Team, teams};
//!
//! # async fn example() -> lynx_provider::lynx::error::Result<()> {
//! let client = LynxClient::new("http://localhost:4000/api/v1", "api-key")?;
//! let team = Team {
//!     name: "core".to_string(),
//!     slug: "core".to_string(),
//!     members: vec!["u1".to_string(), "u2".to_string()],
//!     ..Default::default()
//! };
//! let created = teams::create_team(&client, &team).await?;
//! let fetched = teams::get_team(&client, &created.id).await?;
//! assert_eq!(fetched.members, created.members);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod environments;
pub mod error;
pub mod http;
pub mod model;
pub mod projects;
pub mod snapshots;
pub mod teams;
pub mod users;

pub use client::LynxClient;
pub use error::{LynxError, Result};
