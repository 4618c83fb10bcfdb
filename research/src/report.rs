use std::{io, io::Write};

use anubis_elo::{BacktestReport, RatingRow};
use serde::Serialize;

#[derive(Serialize)]
struct CsvRow<'a> {
    display_name: &'a str,
    rating: String,
    games: u32,
    wins: u32,
    losses: u32,
}

/// Writes the ratings table as CSV, one row per competitor, in the given
/// order. Ratings have two decimals.
pub fn write_ratings<W: Write>(writer: W, rows: &[RatingRow]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        writer.write_record(["display_name", "rating", "games", "wins", "losses"])?;
    }
    for row in rows {
        writer.serialize(CsvRow {
            display_name: &row.display_name,
            rating: format!("{:.2}", row.rating),
            games: row.games,
            wins: row.wins,
            losses: row.losses,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the summary line, followed by up to `top` rows of the ratings
/// table in a human-readable layout.
pub fn write_summary<W: Write>(
    mut writer: W,
    report: &BacktestReport,
    top: usize,
) -> io::Result<()> {
    writeln!(writer, "{}", report.metrics)?;
    for row in report.ratings.iter().take(top) {
        writeln!(
            writer,
            "{}\t{:.2}\tgames={}\twins={}\tlosses={}",
            row.display_name, row.rating, row.games, row.wins, row.losses
        )?;
    }
    Ok(())
}
