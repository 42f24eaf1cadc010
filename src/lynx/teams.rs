//! Lynx Teams
//!
//! CRUD calls for teams. Member order is kept exactly as given, both on the
//! way out and as returned by the server.

use super::client::LynxClient;
use super::error::Result;
use super::model::Team;

const RESOURCE: &str = "team";

/// Create a team
pub async fn create_team(client: &LynxClient, team: &Team) -> Result<Team> {
    client.post(&client.collection_url(RESOURCE), team).await
}

/// Get a team by id
pub async fn get_team(client: &LynxClient, team_id: &str) -> Result<Team> {
    client.get(&client.member_url(RESOURCE, team_id)?).await
}

/// Update a team, addressed by `team.id`
pub async fn update_team(client: &LynxClient, team: &Team) -> Result<Team> {
    client.put(&client.member_url(RESOURCE, &team.id)?, team).await
}

/// Delete a team
pub async fn delete_team(client: &LynxClient, team_id: &str) -> Result<()> {
    client.delete(&client.member_url(RESOURCE, team_id)?).await
}

/// Normalize member identifiers coming from a state document.
///
/// Surrounding whitespace and quote characters are stripped and blank entries
/// dropped. Order is preserved.
pub fn normalize_members<I, S>(members: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    members
        .into_iter()
        .map(|m| {
            m.as_ref()
                .trim_matches(|c: char| c == '"' || c.is_whitespace())
                .to_string()
        })
        .filter(|m| !m.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_members_strips_quotes_and_keeps_order() {
        let members = normalize_members(["\"u2\"", " u1 ", "u3"]);
        assert_eq!(members, vec!["u2", "u1", "u3"]);
    }

    #[test]
    fn test_normalize_members_drops_blank_entries() {
        let members = normalize_members(vec!["", "\"\"", "u1"]);
        assert_eq!(members, vec!["u1"]);
    }
}
