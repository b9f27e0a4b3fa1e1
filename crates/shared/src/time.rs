//! Timestamp helpers.

use chrono::{DateTime, SecondsFormat, Utc};

/// Compact UTC timestamp suitable for embedding in file names.
pub fn file_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%dT%H%M%SZ").to_string()
}

/// RFC 3339 rendering with second precision, used in human-readable output.
pub fn display_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_file_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(file_timestamp(at), "20240309T070501Z");
    }

    #[test]
    fn test_display_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(display_timestamp(at), "2024-03-09T07:05:01Z");
    }
}
