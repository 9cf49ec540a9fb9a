//! Front-matter dates

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a front-matter date string.
///
/// Strings carrying an offset keep it; anything else is read as wall-clock
/// time in `tz`. Returns `None` for unrecognised input and for local times
/// that do not exist in `tz` (DST gaps).
pub fn parse_date(s: &str, tz: Tz) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt);
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return localize(naive, tz);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return localize(d.and_hms_opt(0, 0, 0)?, tz);
        }
    }

    None
}

fn localize(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<FixedOffset>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
}

/// Format a date using a Moment.js-style format string
///
/// ```ignore
/// format_date(&date, "YYYY-MM-DD") // -> "2024-01-15"
/// ```
pub fn format_date<Tz2: TimeZone>(date: &DateTime<Tz2>, format: &str) -> String
where
    Tz2::Offset: std::fmt::Display,
{
    date.format(&moment_to_chrono_format(format)).to_string()
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest patterns first within each group so "MMMM" wins over "MM"
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DDDD", "%j"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("dddd", "%A"),
        ("ddd", "%a"),
        ("ZZ", "%z"),
    ];

    let mut result = format.to_string();
    for (from, to) in replacements {
        result = result.replace(from, to);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_plain_date_in_site_timezone() {
        let dt = parse_date("2023-01-02", chrono_tz::UTC).unwrap();
        assert_eq!(dt.to_rfc3339(), "2023-01-02T00:00:00+00:00");

        let dt = parse_date("2023/01/02", chrono_tz::Asia::Tokyo).unwrap();
        assert_eq!(dt.to_rfc3339(), "2023-01-02T00:00:00+09:00");
    }

    #[test]
    fn test_parse_datetime_variants() {
        let dt = parse_date("2024-01-15 10:30:00", chrono_tz::UTC).unwrap();
        assert_eq!(dt.hour(), 10);
        assert_eq!(dt.minute(), 30);

        let dt = parse_date("2024-01-15 10:30", chrono_tz::UTC).unwrap();
        assert_eq!(dt.minute(), 30);

        let dt = parse_date("2024-01-15T10:30:00", chrono_tz::UTC).unwrap();
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn test_parse_keeps_explicit_offset() {
        let dt = parse_date("2024-01-15T10:30:00-05:00", chrono_tz::Asia::Tokyo).unwrap();
        assert_eq!(dt.offset().local_minus_utc(), -5 * 3600);
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date("yesterday", chrono_tz::UTC).is_none());
        assert!(parse_date("2023-13-40", chrono_tz::UTC).is_none());
        assert!(parse_date("", chrono_tz::UTC).is_none());
    }

    #[test]
    fn test_dst_gap_is_rejected() {
        // 02:30 does not exist in Berlin on the spring-forward night
        assert!(parse_date("2024-03-31 02:30", chrono_tz::Europe::Berlin).is_none());
    }

    #[test]
    fn test_format_date() {
        let date = parse_date("2024-01-15 10:30:00", chrono_tz::UTC).unwrap();
        assert_eq!(format_date(&date, "YYYY-MM-DD"), "2024-01-15");
        assert_eq!(format_date(&date, "MMMM DD, YYYY"), "January 15, 2024");
        assert_eq!(moment_to_chrono_format("HH:mm:ss"), "%H:%M:%S");
    }
}
