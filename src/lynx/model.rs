//! Lynx domain models
//!
//! Wire representations of the entities exposed by the Lynx API. Empty fields
//! are never serialized, so the server applies its own defaults for anything
//! left unset.

use serde::{Deserialize, Serialize};
use std::fmt;

fn is_false(value: &bool) -> bool {
    !*value
}

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Regular,
    Super,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Regular => "regular",
            UserRole::Super => "super",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular" => Ok(UserRole::Regular),
            "super" => Ok(UserRole::Super),
            other => Err(format!("unknown role '{}', expected 'regular' or 'super'", other)),
        }
    }
}

/// User
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub verified: bool,
}

/// Team
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub slug: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Member identifiers, in the order given
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
}

/// Reference to a team by identifier only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    #[serde(default)]
    pub id: String,
}

/// Reference to a project by identifier only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    #[serde(default)]
    pub id: String,
}

impl TeamRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl ProjectRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub slug: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamRef>,
}

/// Environment, always nested under a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub slug: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub secret: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectRef>,
}

impl Environment {
    /// Identifier of the owning project, empty when unset
    pub fn project_id(&self) -> &str {
        self.project.as_ref().map(|p| p.id.as_str()).unwrap_or("")
    }
}

/// Snapshot of an arbitrary record, owned by a team
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub record_type: String,
    #[serde(
        default,
        rename = "record_uuid",
        alias = "record_id",
        skip_serializing_if = "String::is_empty"
    )]
    pub record_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamRef>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unset_fields_are_omitted() {
        let team = Team {
            name: "core".to_string(),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&team).unwrap(), json!({"name": "core"}));

        let user = User::default();
        assert_eq!(serde_json::to_value(&user).unwrap(), json!({}));
    }

    #[test]
    fn test_user_role_wire_format() {
        let user = User {
            name: "Selena".to_string(),
            role: Some(UserRole::Super),
            verified: true,
            ..Default::default()
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["role"], "super");
        assert_eq!(value["verified"], true);
        assert_eq!("regular".parse::<UserRole>().unwrap(), UserRole::Regular);
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_snapshot_record_id_wire_name() {
        let snapshot = Snapshot {
            record_type: "project".to_string(),
            record_id: "p1".to_string(),
            team: Some(TeamRef::new("t1")),
            ..Default::default()
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["record_uuid"], "p1");
        assert!(value.get("record_id").is_none());
        assert_eq!(value["team"], json!({"id": "t1"}));

        let decoded: Snapshot =
            serde_json::from_value(json!({"id": "s1", "record_id": "p2"})).unwrap();
        assert_eq!(decoded.record_id, "p2");
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let project: Project = serde_json::from_value(json!({
            "id": "p1",
            "name": "api",
            "team": {"id": "t1", "name": "core"},
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(project.team, Some(TeamRef::new("t1")));
    }

    #[test]
    fn test_environment_project_id() {
        let env = Environment {
            project: Some(ProjectRef::new("p1")),
            ..Default::default()
        };
        assert_eq!(env.project_id(), "p1");
        assert_eq!(Environment::default().project_id(), "");
    }
}
