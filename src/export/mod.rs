//! Ranking export.
//!
//! CSV carries the tabular view (one row per candidate, rank order). JSON carries every
//! [`ScoredCandidate`] field, including the penalty note and recorded failures.

mod error;


pub use error::{ExportError, ExportResult};

use std::io::Write;

use serde::Serialize;

use crate::ranking::ScoredCandidate;

/// CSV header row, in column order.
pub const CSV_HEADERS: [&str; 4] = [
    "Candidate Name",
    "File Name",
    "Adjusted Score",
    "Justification",
];

#[derive(Serialize)]
struct CsvRow<'a> {
    display_name: &'a str,
    identifier: &'a str,
    adjusted_score: String,
    justification: &'a str,
}

impl<'a> From<&'a ScoredCandidate> for CsvRow<'a> {
    fn from(candidate: &'a ScoredCandidate) -> Self {
        Self {
            display_name: candidate.display_name(),
            identifier: candidate.identifier(),
            adjusted_score: format!("{:.2}", candidate.adjusted_score()),
            justification: candidate.justification(),
        }
    }
}

/// Writes the ranking as CSV. The header row is written even when `ranked` is empty.
pub fn write_csv<W: Write>(ranked: &[ScoredCandidate], writer: W) -> ExportResult<()> {
    let mut out = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    out.write_record(CSV_HEADERS)?;
    for candidate in ranked {
        out.serialize(CsvRow::from(candidate))?;
    }
    out.flush()?;
    Ok(())
}

/// Writes the ranking as pretty-printed JSON.
pub fn write_json<W: Write>(ranked: &[ScoredCandidate], mut writer: W) -> ExportResult<()> {
    serde_json::to_writer_pretty(&mut writer, ranked)?;
    writer.write_all(b"\n")?;
    Ok(())
}
