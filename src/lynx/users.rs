//! Lynx Users
//!
//! CRUD calls for users. The server never echoes the password back.

use super::client::LynxClient;
use super::error::Result;
use super::model::User;

const RESOURCE: &str = "user";

/// Create a user
pub async fn create_user(client: &LynxClient, user: &User) -> Result<User> {
    client.post(&client.collection_url(RESOURCE), user).await
}

/// Get a user by id
pub async fn get_user(client: &LynxClient, user_id: &str) -> Result<User> {
    client.get(&client.member_url(RESOURCE, user_id)?).await
}

/// Update a user, addressed by `user.id`
pub async fn update_user(client: &LynxClient, user: &User) -> Result<User> {
    client.put(&client.member_url(RESOURCE, &user.id)?, user).await
}

/// Delete a user
pub async fn delete_user(client: &LynxClient, user_id: &str) -> Result<()> {
    client.delete(&client.member_url(RESOURCE, user_id)?).await
}
