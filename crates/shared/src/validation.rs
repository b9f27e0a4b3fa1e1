//! Common validation utilities.

use validator::ValidationError;

/// Maximum length of user, team, board names and task titles.
pub const MAX_NAME_LENGTH: u64 = 64;

/// Maximum length of descriptions and updated display names.
pub const MAX_DESCRIPTION_LENGTH: u64 = 128;

/// Trims surrounding whitespace from a user-supplied string.
pub fn normalize(value: &str) -> String {
    value.trim().to_string()
}

/// Trims an optional user-supplied string.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value.map(|v| normalize(&v))
}

/// Trims an optional free-text field; blank input becomes `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    normalize_optional(value).filter(|v| !v.is_empty())
}

/// Validates a list of entity identifiers.
/// - Must contain at least one id
/// - Every id must be positive
pub fn validate_id_list(ids: &[i64]) -> Result<(), ValidationError> {
    if ids.is_empty() {
        let mut err = ValidationError::new("ids_empty");
        err.message = Some("At least one user id is required".into());
        return Err(err);
    }

    if let Some(bad) = ids.iter().find(|id| **id <= 0) {
        let mut err = ValidationError::new("ids_invalid");
        err.message = Some(format!("Invalid user id: {}", bad).into());
        return Err(err);
    }

    Ok(())
}

/// Removes duplicate ids while keeping the first occurrence order.
pub fn dedup_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(id) {
            seen.push(*id);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize("  alice \n"), "alice");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(
            normalize_optional(Some(" sprint ".to_string())),
            Some("sprint".to_string())
        );
        assert_eq!(normalize_optional(None), None);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some(String::new())), None);
        assert_eq!(
            non_blank(Some(" notes ".to_string())),
            Some("notes".to_string())
        );
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_validate_id_list() {
        assert!(validate_id_list(&[1, 2, 3]).is_ok());
        assert!(validate_id_list(&[]).is_err());
        assert!(validate_id_list(&[1, 0]).is_err());
        assert!(validate_id_list(&[-4]).is_err());
    }

    #[test]
    fn test_validate_id_list_error_message() {
        let err = validate_id_list(&[3, -1]).unwrap_err();
        assert_eq!(err.message.unwrap().to_string(), "Invalid user id: -1");

        let err = validate_id_list(&[]).unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "At least one user id is required"
        );
    }

    #[test]
    fn test_dedup_ids_keeps_order() {
        assert_eq!(dedup_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
        assert!(dedup_ids(&[]).is_empty());
    }
}
