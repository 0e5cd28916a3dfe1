//! CSV roster parsing. Uses the `csv` crate with serde for header-based columns.
//!
//! Format: header row with `username` and `birthday` columns (any order,
//! extra columns ignored). Birthdays accept the common date layouts below.

use crate::domain::{DomainError, RosterRow};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// Date-only layouts, tried in order. Slash dates are month-first.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    // Day-first only when the first field cannot be a month
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d.%m.%Y",
    "%Y%m%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d-%b-%Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Deserialize)]
struct RawRow {
    username: String,
    birthday: String,
}

/// Parse a birthday in any supported layout. Time and offset parts are dropped.
pub fn parse_birthday(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Parse the whole roster. Any bad row fails the whole parse (no partial results).
pub fn parse_roster(text: &str) -> Result<Vec<RosterRow>, DomainError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (idx, record) in rdr.deserialize::<RawRow>().enumerate() {
        // 1-based, counting the header line
        let line = idx + 2;
        let raw = record.map_err(|e| DomainError::Roster(format!("line {}: {}", line, e)))?;

        if raw.username.is_empty() {
            return Err(DomainError::Roster(format!("line {}: empty username", line)));
        }
        let birthday = parse_birthday(&raw.birthday).ok_or_else(|| {
            DomainError::Roster(format!(
                "line {}: unparsable birthday {:?} for {}",
                line, raw.birthday, raw.username
            ))
        })?;

        rows.push(RosterRow {
            username: raw.username,
            birthday,
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_birthday_layouts() {
        let expected = date(1990, 3, 14);
        for raw in [
            "1990-03-14",
            "1990/03/14",
            "03/14/1990",
            "3/14/1990",
            "03-14-1990",
            "14.03.1990",
            "19900314",
            "March 14, 1990",
            "Mar 14, 1990",
            "14 March 1990",
            "1990-03-14T08:30:00",
            "1990-03-14 08:30:00",
            "1990-03-14T08:30:00+02:00",
            "14/03/1990",
            "1990-03-14 08:30",
            "1990-03-14T08:30",
            "Mar 14 1990",
            "March 14 1990",
            "14-Mar-1990",
        ] {
            assert_eq!(parse_birthday(raw), Some(expected), "layout {:?}", raw);
        }
    }

    #[test]
    fn test_parse_birthday_ambiguous_slash_is_month_first() {
        assert_eq!(parse_birthday("03/04/1990"), Some(date(1990, 3, 4)));
        assert_eq!(parse_birthday("13/04/1990"), Some(date(1990, 4, 13)));
    }

    #[test]
    fn test_parse_roster_day_first_row() {
        let csv = "username,birthday\nalice,1990-03-14\nbob,14/03/1985\n";
        let rows = parse_roster(csv).unwrap();
        assert_eq!(rows[1].birthday, date(1985, 3, 14));
    }

    #[test]
    fn test_parse_birthday_rejects_garbage() {
        assert_eq!(parse_birthday(""), None);
        assert_eq!(parse_birthday("someday"), None);
        assert_eq!(parse_birthday("1990-02-30"), None);
    }

    #[test]
    fn test_parse_roster_keeps_file_order() {
        let csv = "username,birthday\nalice,1990-03-14\nbob,1985-03-14\ncarol,2000-03-15";
        let rows = parse_roster(csv).unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(names, ["alice", "bob", "carol"]);
        assert_eq!(rows[2].birthday, date(2000, 3, 15));
    }

    #[test]
    fn test_parse_roster_column_order_and_extras() {
        let csv = "birthday, team ,username\n 1990-03-14 , core, alice \n";
        let rows = parse_roster(csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].username, "alice");
    }

    #[test]
    fn test_parse_roster_missing_column() {
        let csv = "username,dob\nalice,1990-03-14";
        assert!(matches!(parse_roster(csv), Err(DomainError::Roster(_))));
    }

    #[test]
    fn test_parse_roster_bad_date_reports_line() {
        let csv = "username,birthday\nalice,1990-03-14\nbob,not-a-date";
        let err = parse_roster(csv).unwrap_err().to_string();
        assert!(err.contains("line 3"), "{}", err);
        assert!(err.contains("bob"), "{}", err);
    }

    #[test]
    fn test_parse_roster_empty_username() {
        let csv = "username,birthday\n,1990-03-14";
        assert!(parse_roster(csv).is_err());
    }

    #[test]
    fn test_parse_roster_header_only() {
        assert!(parse_roster("username,birthday").unwrap().is_empty());
    }
}
