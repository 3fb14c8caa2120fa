//! Snapshot CSV ingestion
//!
//! Parses the daily-distribution CSVs written by the trade-archiving scripts
//! into normalized [`DistributionRow`]s, tagging every row with its source
//! category. A source that is missing required columns or contains
//! unparsable values fails ingestion outright; the table cannot be built
//! from partial data.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use distribution_core::{Category, DistributionRow};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

/// One configured snapshot source: a CSV file tagged with its category
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    pub category: Category,
    pub path: PathBuf,
}

/// Default source layout under a data directory
pub fn default_sources(data_dir: &Path) -> Vec<SnapshotSource> {
    vec![
        SnapshotSource {
            category: Category::FedLevels,
            path: data_dir.join("daily_distributions_fed_levels.csv"),
        },
        SnapshotSource {
            category: Category::HeadlineCpiReleases,
            path: data_dir.join("daily_distributions_headline_cpi_releases.csv"),
        },
    ]
}

/// Raw CSV row as written by the acquisition scripts
///
/// Extra columns (the frame index, for one) are ignored; the listed columns
/// are required.
#[derive(Debug, Deserialize)]
struct RawSnapshotRecord {
    date: String,
    expiry_date: String,
    contract_preamble: String,
    strike: Decimal,
    probability: Decimal,
}

/// Errors raised while ingesting a snapshot source
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Failed to open snapshot source {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed snapshot source: {0}")]
    MalformedRecord(#[from] csv::Error),

    #[error("Malformed snapshot source: unparsable {column} value '{value}'")]
    BadDate { column: &'static str, value: String },
}

/// Load one snapshot file, stamping every row with the source's category
pub fn load_snapshot_file(source: &SnapshotSource) -> Result<Vec<DistributionRow>, IngestError> {
    let file = File::open(&source.path).map_err(|e| IngestError::Open {
        path: source.path.clone(),
        source: e,
    })?;

    let rows = read_snapshot_rows(file, source.category)?;
    info!(
        "Loaded {} rows from {} ({})",
        rows.len(),
        source.path.display(),
        source.category
    );
    Ok(rows)
}

/// Parse snapshot CSV rows from any reader into normalized distribution rows
pub fn read_snapshot_rows<R: Read>(
    reader: R,
    category: Category,
) -> Result<Vec<DistributionRow>, IngestError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<RawSnapshotRecord>() {
        let raw = record?;
        rows.push(DistributionRow {
            category,
            prediction_date: parse_snapshot_date("date", &raw.date)?,
            horizon_date: parse_snapshot_date("expiry_date", &raw.expiry_date)?,
            contract_preamble: raw.contract_preamble,
            strike: raw.strike,
            probability: raw.probability,
        });
    }

    Ok(rows)
}

/// Dates arrive either bare (`2025-07-30`) or with a midnight timestamp
/// (`2025-07-30 00:00:00`), depending on how the source frame was written.
fn parse_snapshot_date(column: &'static str, value: &str) -> Result<NaiveDate, IngestError> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.date())
        .map_err(|_| IngestError::BadDate {
            column,
            value: value.to_string(),
        })
}
