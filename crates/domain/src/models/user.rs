//! User domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::normalize;
use validator::Validate;

/// A planner user. The `name` is unique and never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a user.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateUserRequest {
    #[validate(length(
        min = 1,
        max = 64,
        message = "Name must be between 1 and 64 characters"
    ))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 64,
        message = "Display name must be between 1 and 64 characters"
    ))]
    pub display_name: String,
}

impl CreateUserRequest {
    pub fn normalized(self) -> Self {
        Self {
            name: normalize(&self.name),
            display_name: normalize(&self.display_name),
        }
    }
}

/// Request payload for updating a user.
///
/// `name` is accepted only so that an attempt to change it can be rejected.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateUserRequest {
    #[validate(length(
        min = 1,
        max = 128,
        message = "Display name must be between 1 and 128 characters"
    ))]
    pub display_name: String,

    #[serde(default)]
    pub name: Option<String>,
}

impl UpdateUserRequest {
    pub fn normalized(self) -> Self {
        Self {
            display_name: normalize(&self.display_name),
            name: self.name,
        }
    }
}
