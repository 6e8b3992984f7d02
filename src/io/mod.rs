//! Roster input and assignment export as CSV.

mod export;
mod roster;

pub use export::{write_assignment, write_assignment_path, write_trace, write_trace_path};
pub use roster::{read_roster, read_roster_path, RosterColumns};
