//! Domain layer for the Project Planner backend.
//!
//! This crate contains:
//! - Domain models (User, Team, Board, Task)
//! - Service contracts and the board export formatter
//! - Domain error types

pub mod error;
pub mod models;
pub mod services;

pub use error::{DomainError, DomainResult};
