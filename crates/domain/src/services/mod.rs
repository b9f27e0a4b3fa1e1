//! Domain services for the Project Planner.
//!
//! Service traits define the operation contracts; the export module holds
//! the pure report formatter.

pub mod board;
pub mod export;
pub mod team;
pub mod user;

pub use board::BoardService;
pub use export::{export_file_name, numbered_file_name, render_board_report};
pub use team::TeamService;
pub use user::UserService;
