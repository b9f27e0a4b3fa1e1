//! Domain models for the Project Planner.

pub mod board;
pub mod export;
pub mod task;
pub mod team;
pub mod user;

pub use board::{Board, BoardStatus, CreateBoardRequest};
pub use export::{BoardReport, ExportArtifact, TaskLine};
pub use task::{CreateTaskRequest, Task, TaskStatus, UpdateTaskStatusRequest};
pub use team::{
    CreateTeamRequest, Team, TeamMembersRequest, UpdateTeamRequest, MAX_TEAM_MEMBERS,
};
pub use user::{CreateUserRequest, UpdateUserRequest, User};
