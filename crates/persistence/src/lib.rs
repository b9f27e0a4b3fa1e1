//! Persistence layer for the Project Planner backend.
//!
//! This crate contains:
//! - SQLite connection management and embedded migrations
//! - Entity definitions (database row mappings)
//! - Repository implementations

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
