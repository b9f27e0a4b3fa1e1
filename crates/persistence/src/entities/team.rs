//! Team entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the teams table.
#[derive(Debug, Clone, FromRow)]
pub struct TeamEntity {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub admin_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<TeamEntity> for domain::models::Team {
    fn from(entity: TeamEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            admin_id: entity.admin_id,
            created_at: entity.created_at,
        }
    }
}
