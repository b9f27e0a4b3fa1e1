//! Team domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::{normalize, normalize_optional, validate_id_list};
use validator::Validate;

/// Maximum number of members a team may hold, admin included.
pub const MAX_TEAM_MEMBERS: usize = 50;

/// A team. The admin is always one of its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub admin_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a team.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateTeamRequest {
    #[validate(length(
        min = 1,
        max = 64,
        message = "Name must be between 1 and 64 characters"
    ))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 128, message = "Description must be at most 128 characters"))]
    pub description: String,

    #[serde(alias = "admin_id")]
    #[validate(range(min = 1, message = "Admin must be a valid user id"))]
    pub admin: i64,
}

impl CreateTeamRequest {
    pub fn normalized(self) -> Self {
        Self {
            name: normalize(&self.name),
            description: normalize(&self.description),
            admin: self.admin,
        }
    }
}

/// Request payload for updating a team. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateTeamRequest {
    #[validate(length(
        min = 1,
        max = 64,
        message = "Name must be between 1 and 64 characters"
    ))]
    pub name: Option<String>,

    #[validate(length(max = 128, message = "Description must be at most 128 characters"))]
    pub description: Option<String>,

    #[serde(alias = "admin_id")]
    #[validate(range(min = 1, message = "Admin must be a valid user id"))]
    pub admin: Option<i64>,
}

impl UpdateTeamRequest {
    pub fn normalized(self) -> Self {
        Self {
            name: normalize_optional(self.name),
            description: normalize_optional(self.description),
            admin: self.admin,
        }
    }

    /// Returns true if the request changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.admin.is_none()
    }
}

/// Request payload for adding or removing team members.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct TeamMembersRequest {
    #[validate(custom(function = "validate_id_list"))]
    pub users: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_team_request_validation() {
        let valid = CreateTeamRequest {
            name: "eng".to_string(),
            description: "Engineering".to_string(),
            admin: 1,
        };
        assert!(valid.validate().is_ok());

        let long_description = CreateTeamRequest {
            name: "eng".to_string(),
            description: "d".repeat(129),
            admin: 1,
        };
        assert!(long_description.validate().is_err());

        let bad_admin = CreateTeamRequest {
            name: "eng".to_string(),
            description: String::new(),
            admin: 0,
        };
        assert!(bad_admin.validate().is_err());
    }

    #[test]
    fn test_create_team_request_description_optional() {
        let request: CreateTeamRequest =
            serde_json::from_str(r#"{"name": "eng", "admin": 3}"#).unwrap();
        assert_eq!(request.description, "");
        assert_eq!(request.admin, 3);
    }

    #[test]
    fn test_update_team_request_is_empty() {
        assert!(UpdateTeamRequest::default().is_empty());

        let request = UpdateTeamRequest {
            admin: Some(2),
            ..Default::default()
        };
        assert!(!request.is_empty());
    }

    #[test]
    fn test_update_team_request_normalized_blank_name_fails() {
        let request = UpdateTeamRequest {
            name: Some("   ".to_string()),
            ..Default::default()
        }
        .normalized();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_team_members_request_validation() {
        let valid = TeamMembersRequest { users: vec![1, 2] };
        assert!(valid.validate().is_ok());

        let empty = TeamMembersRequest { users: vec![] };
        assert!(empty.validate().is_err());

        let negative = TeamMembersRequest { users: vec![1, -2] };
        assert!(negative.validate().is_err());
    }
}
