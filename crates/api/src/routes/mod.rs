//! HTTP route handlers.

pub mod boards;
pub mod health;
pub mod tasks;
pub mod teams;
pub mod users;
