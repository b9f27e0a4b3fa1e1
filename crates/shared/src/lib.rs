//! Shared utilities and common types for the Project Planner backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Input normalisation and field validation helpers
//! - Timestamp formatting

pub mod time;
pub mod validation;
