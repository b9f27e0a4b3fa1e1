//! Database entity definitions (row mappings).

pub mod board;
pub mod task;
pub mod team;
pub mod user;

pub use board::{BoardEntity, BoardStatusDb};
pub use task::{TaskEntity, TaskStatusDb, TaskWithAssigneeEntity};
pub use team::TeamEntity;
pub use user::UserEntity;
