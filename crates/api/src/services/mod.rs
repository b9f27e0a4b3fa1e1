//! SQLite-backed implementations of the planner service contracts.

pub mod boards;
pub mod teams;
pub mod users;

pub use boards::SqlBoardService;
pub use teams::SqlTeamService;
pub use users::SqlUserService;

use domain::{DomainError, DomainResult};
use persistence::db::{
    ADMIN_REMOVAL_MARKER, CLOSED_BOARD_MARKER, MEMBER_LIMIT_MARKER, STATUS_REGRESSION_MARKER,
};

/// Maps store failures onto the domain error taxonomy.
///
/// Trigger aborts are recognised by their message, constraint violations by
/// their kind. Everything else is an internal error.
pub(crate) trait StoreResultExt<T> {
    /// Classify an error; unique violations become `DuplicateName` with `duplicate`.
    fn or_duplicate(self, duplicate: impl Into<String>) -> DomainResult<T>;

    /// Classify an error where no uniqueness rule is in play.
    fn or_store_error(self) -> DomainResult<T>;
}

impl<T> StoreResultExt<T> for Result<T, sqlx::Error> {
    fn or_duplicate(self, duplicate: impl Into<String>) -> DomainResult<T> {
        self.map_err(|err| classify(err, Some(duplicate.into())))
    }

    fn or_store_error(self) -> DomainResult<T> {
        self.map_err(|err| classify(err, None))
    }
}

fn classify(err: sqlx::Error, duplicate: Option<String>) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        let message = db_err.message();

        if message.contains(MEMBER_LIMIT_MARKER) {
            return DomainError::CapacityExceeded(format!(
                "Team cannot have more than {} members",
                domain::models::MAX_TEAM_MEMBERS
            ));
        }
        if message.contains(ADMIN_REMOVAL_MARKER) {
            return DomainError::invalid_operation("Team admin cannot be removed from the team");
        }
        if message.contains(CLOSED_BOARD_MARKER) {
            return DomainError::invalid_operation("Cannot add tasks to a closed board");
        }
        if message.contains(STATUS_REGRESSION_MARKER) {
            return DomainError::invalid_operation("Task status cannot move backward");
        }
        if db_err.is_unique_violation() {
            return DomainError::DuplicateName(
                duplicate.unwrap_or_else(|| "Name already exists".to_string()),
            );
        }
        if db_err.is_foreign_key_violation() {
            return DomainError::not_found("Referenced resource not found");
        }
    }

    DomainError::Internal(format!("Database error: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_internal() {
        let result: Result<(), sqlx::Error> = Err(sqlx::Error::PoolTimedOut);
        let err = result.or_duplicate("taken").unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
    }

    #[test]
    fn test_row_not_found_is_internal() {
        let result: Result<(), sqlx::Error> = Err(sqlx::Error::RowNotFound);
        assert!(matches!(
            result.or_store_error().unwrap_err(),
            DomainError::Internal(_)
        ));
    }
}
