//! Tournament business logic: standings, pairings and match reporting.

mod pairings;
mod reporting;
mod standings;

pub use pairings::{generate_pairings, swiss_pairings};
pub use reporting::report_match;
pub use standings::{compute_standings, tally};
