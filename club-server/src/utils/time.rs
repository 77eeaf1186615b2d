//! Time helpers for the school time zone
//!
//! Wall-clock inputs are converted to `i64` Unix millis at the API layer;
//! repositories and the admission engine only see millis and `NaiveTime`.

use chrono::{LocalResult, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;

use super::{AppError, AppResult};

const CLASS_TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];
const LOCAL_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a class time (`HH:MM`)
pub fn parse_class_time(value: &str, field: &str) -> AppResult<NaiveTime> {
    let value = value.trim();
    CLASS_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| {
            AppError::validation(format!("{field} must be HH:MM, got '{value}'"))
                .with_detail("field", field)
        })
}

/// Parse a local datetime (`YYYY-MM-DDTHH:MM`) in `tz` into Unix millis
pub fn parse_local_datetime(value: &str, field: &str, tz: Tz) -> AppResult<i64> {
    let value = value.trim();
    let naive = LOCAL_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| {
            AppError::validation(format!(
                "{field} must be YYYY-MM-DDTHH:MM, got '{value}'"
            ))
            .with_detail("field", field)
        })?;
    local_to_millis(naive, tz).map_err(|e| e.with_detail("field", field))
}

/// Local wall-clock time → Unix millis
///
/// Ambiguous times (DST fold) take the later instant. Times that do not
/// exist in `tz` (DST gap) are a validation error.
pub fn local_to_millis(naive: NaiveDateTime, tz: Tz) -> AppResult<i64> {
    match naive.and_local_timezone(tz) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(_, dt) => Ok(dt.timestamp_millis()),
        LocalResult::None => Err(AppError::validation(format!(
            "{naive} does not exist in {tz}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_class_times() {
        assert_eq!(
            parse_class_time("14:30", "classStart").unwrap(),
            NaiveTime::from_hms_opt(14, 30, 0).unwrap()
        );
        assert_eq!(
            parse_class_time(" 08:05:00 ", "classStart").unwrap(),
            NaiveTime::from_hms_opt(8, 5, 0).unwrap()
        );
        let err = parse_class_time("25:00", "classEnd").unwrap_err();
        assert!(err.message.contains("classEnd"));
    }

    #[test]
    fn local_datetime_uses_school_zone() {
        // Taipei is UTC+8 with no DST
        let millis =
            parse_local_datetime("2026-09-01T08:00", "registrationStart", chrono_tz::Asia::Taipei)
                .unwrap();
        let expected = NaiveDate::from_ymd_opt(2026, 9, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis();
        assert_eq!(millis, expected);
    }

    #[test]
    fn rejects_malformed_datetime() {
        assert!(parse_local_datetime("09/01/2026", "registrationEnd", chrono_tz::UTC).is_err());
    }

    #[test]
    fn dst_gap_is_rejected() {
        let tz = chrono_tz::America::New_York;
        // clocks jump 02:00 -> 03:00 on 2026-03-08
        let err = parse_local_datetime("2026-03-08T02:30", "registrationStart", tz).unwrap_err();
        assert_eq!(err.code, shared::error::ErrorCode::ValidationFailed);
        assert!(err.details.is_some());

        let before = parse_local_datetime("2026-03-08T01:59", "registrationStart", tz).unwrap();
        let after = parse_local_datetime("2026-03-08T03:00", "registrationStart", tz).unwrap();
        assert_eq!(after - before, 60_000);
    }

    #[test]
    fn dst_fold_takes_the_later_instant() {
        let tz = chrono_tz::America::New_York;
        // 01:30 happens twice on 2026-11-01; the second one is EST (UTC-5)
        let millis = parse_local_datetime("2026-11-01T01:30", "registrationEnd", tz).unwrap();
        let expected = NaiveDate::from_ymd_opt(2026, 11, 1)
            .unwrap()
            .and_hms_opt(6, 30, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis();
        assert_eq!(millis, expected);
    }
}
