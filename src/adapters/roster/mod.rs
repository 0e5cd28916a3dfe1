//! Roster parsing. Turns CSV text into domain RosterRows.

pub mod csv_roster;

pub use csv_roster::{parse_birthday, parse_roster};
