//! Repository implementations for database operations.

pub mod board;
pub mod task;
pub mod team;
pub mod user;

pub use board::BoardRepository;
pub use task::TaskRepository;
pub use team::TeamRepository;
pub use user::UserRepository;
