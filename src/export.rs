//! CSV export of standings.

use crate::models::PlayerStanding;
use serde::Serialize;

#[derive(Serialize)]
struct CsvRow<'a> {
    rank: usize,
    id: i64,
    name: &'a str,
    wins: u32,
    ties: u32,
    losses: u32,
    matches: u32,
    points: u32,
}

/// Render standings as CSV with a header row, ranked from 1 in the given order.
pub fn standings_csv(standings: &[PlayerStanding]) -> Result<String, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for (i, s) in standings.iter().enumerate() {
        wtr.serialize(CsvRow {
            rank: i + 1,
            id: s.id,
            name: &s.name,
            wins: s.wins,
            ties: s.ties,
            losses: s.losses(),
            matches: s.matches,
            points: s.points(),
        })?;
    }
    let bytes = wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| csv::Error::from(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
