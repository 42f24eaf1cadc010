//! `lynx_user` resource
//!
//! The API never returns a user's password, so the adapter carries the
//! password from the document through every operation.

use super::diagnostics::Diagnostics;
use super::schema::{Attribute, Schema};
use super::state::{self, value};
use super::Resource;
use crate::lynx::model::{User, UserRole};
use crate::lynx::{users, LynxClient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// State document of a user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserResourceModel {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl UserResourceModel {
    fn to_user(&self, diags: &mut Diagnostics) -> Option<User> {
        let role = match self.role.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(role) => match role.parse::<UserRole>() {
                Ok(role) => Some(role),
                Err(e) => {
                    diags.add_attribute_error("role", "Invalid User Role", e);
                    return None;
                }
            },
        };

        Some(User {
            id: value(&self.id),
            name: value(&self.name),
            email: value(&self.email),
            role,
            password: value(&self.password),
            verified: false,
        })
    }

    fn apply(&mut self, user: User) {
        self.name = state::server_or(user.name, self.name.take());
        self.email = state::server_or(user.email, self.email.take());
        if let Some(role) = user.role {
            self.role = Some(role.to_string());
        }
    }
}

/// Schema of `lynx_user`
pub fn schema() -> Schema {
    Schema::new("User resource")
        .with_attribute("name", Attribute::required_string("User's name"))
        .with_attribute("email", Attribute::required_string("User's email"))
        .with_attribute(
            "role",
            Attribute::required_string("User's role, either regular or super"),
        )
        .with_attribute(
            "password",
            Attribute::required_string("User's password").sensitive(),
        )
        .with_attribute("id", Attribute::computed_id("User identifier"))
}

/// User resource adapter
pub struct UserResource {
    client: LynxClient,
}

impl UserResource {
    pub fn new(client: LynxClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Resource for UserResource {
    fn metadata(&self, provider_type_name: &str) -> String {
        format!("{}_user", provider_type_name)
    }

    fn schema(&self) -> Schema {
        schema()
    }

    async fn create(&self, plan: Value, diags: &mut Diagnostics) -> Option<Value> {
        let mut data: UserResourceModel = state::decode(plan, diags)?;
        let new_user = data.to_user(diags)?;

        tracing::info!("Create a user with name {}", new_user.name);

        let created = match users::create_user(&self.client, &new_user).await {
            Ok(user) => user,
            Err(err) => {
                state::client_error(diags, "create", "user", &err);
                return None;
            }
        };

        tracing::info!("User with id {} got created", created.id);

        data.id = state::from_server(created.id.clone());
        data.apply(created);
        state::encode(&data, diags)
    }

    async fn read(&self, current: Value, diags: &mut Diagnostics) -> Option<Value> {
        let mut data: UserResourceModel = state::decode(current, diags)?;
        let id = value(&data.id);

        tracing::info!("Read a user with id {}", id);

        let user = match users::get_user(&self.client, &id).await {
            Ok(user) => user,
            Err(err) => {
                state::client_error(diags, "read", "user", &err);
                return None;
            }
        };

        data.name = state::from_server(user.name);
        data.email = state::from_server(user.email);
        data.role = user.role.map(|r| r.to_string());
        // password stays as recorded in state
        state::encode(&data, diags)
    }

    async fn update(&self, plan: Value, diags: &mut Diagnostics) -> Option<Value> {
        let mut data: UserResourceModel = state::decode(plan, diags)?;
        let updated_user = data.to_user(diags)?;

        tracing::info!("Update a user with id {}", updated_user.id);

        let updated = match users::update_user(&self.client, &updated_user).await {
            Ok(user) => user,
            Err(err) => {
                state::client_error(diags, "update", "user", &err);
                return None;
            }
        };

        tracing::info!("User with id {} got updated", updated_user.id);

        data.apply(updated);
        state::encode(&data, diags)
    }

    async fn delete(&self, current: Value, diags: &mut Diagnostics) {
        let Some(data) = state::decode::<UserResourceModel>(current, diags) else {
            return;
        };
        let id = value(&data.id);

        tracing::info!("Delete a user with id {}", id);

        match users::delete_user(&self.client, &id).await {
            Ok(()) => tracing::info!("User with id {} got deleted", id),
            Err(err) => state::client_error(diags, "delete", "user", &err),
        }
    }
}
