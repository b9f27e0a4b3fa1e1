//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            display_name: entity.display_name,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::User;

    #[test]
    fn test_user_entity_conversion() {
        let now = Utc::now();
        let entity = UserEntity {
            id: 7,
            name: "alice".to_string(),
            display_name: "Alice A.".to_string(),
            created_at: now,
        };

        let user: User = entity.into();
        assert_eq!(user.id, 7);
        assert_eq!(user.name, "alice");
        assert_eq!(user.display_name, "Alice A.");
        assert_eq!(user.created_at, now);
    }
}
