//! Roster loading: read the roster source, parse it, keep today's celebrants.

use crate::adapters::roster::parse_roster;
use crate::domain::{DomainError, MonthDay, RosterRow, SourceLocation};
use crate::ports::FileSource;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

/// Usernames celebrating on `date`, in roster order.
pub fn celebrants_on(rows: &[RosterRow], date: NaiveDate) -> Vec<String> {
    rows.iter()
        .filter(|row| row.celebrates_on(date))
        .map(|row| row.username.clone())
        .collect()
}

/// Roster service. Reads the roster fresh on every call; nothing is cached.
pub struct RosterService {
    source: Arc<dyn FileSource>,
    location: SourceLocation,
}

impl RosterService {
    pub fn new(source: Arc<dyn FileSource>, location: SourceLocation) -> Self {
        Self { source, location }
    }

    /// Celebrants for `date`. Missing or malformed roster is an error; no match is `Ok(vec![])`.
    pub async fn celebrants(&self, date: NaiveDate) -> Result<Vec<String>, DomainError> {
        let text = self.source.read_text(&self.location).await?;
        let rows = parse_roster(&text)?;
        let celebrants = celebrants_on(&rows, date);
        info!(
            source = %self.location,
            rows = rows.len(),
            today = %MonthDay::from(date),
            celebrants = celebrants.len(),
            "roster loaded"
        );
        Ok(celebrants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, y: i32, m: u32, d: u32) -> RosterRow {
        RosterRow {
            username: name.into(),
            birthday: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        }
    }

    #[test]
    fn test_celebrants_on_filters_and_keeps_order() {
        let rows = vec![
            row("alice", 1990, 3, 14),
            row("carol", 2000, 3, 15),
            row("bob", 1985, 3, 14),
        ];
        let today = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        assert_eq!(celebrants_on(&rows, today), ["alice", "bob"]);
    }

    #[test]
    fn test_celebrants_on_no_match() {
        let rows = vec![row("alice", 1990, 3, 14)];
        let today = NaiveDate::from_ymd_opt(2026, 12, 25).unwrap();
        assert!(celebrants_on(&rows, today).is_empty());
    }
}
