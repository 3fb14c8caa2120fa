//! Horizon-date overrides
//!
//! Fed rate-level contracts settle on the exchange a few days after the
//! FOMC decision they reference, so their nominal expiry is not the date the
//! underlying event resolves. Ingestion substitutes the decision date itself
//! for the contracts listed here; all other contracts keep their expiry.

use chrono::NaiveDate;
use distribution_core::DistributionRow;

/// Canonical event date for contracts whose nominal expiry diverges from it
pub fn horizon_override(contract_preamble: &str) -> Option<NaiveDate> {
    let (year, month, day) = match contract_preamble {
        "FED-25JUL" => (2025, 7, 30),
        "FED-25SEP" => (2025, 9, 17),
        "FED-25OCT" => (2025, 10, 29),
        "FED-25DEC" => (2025, 12, 10),
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Replace `horizon_date` on rows with a known override
///
/// Rows without a matching override pass through unchanged. The transform is
/// row-independent and idempotent.
pub fn apply_horizon_overrides(mut rows: Vec<DistributionRow>) -> Vec<DistributionRow> {
    for row in &mut rows {
        if let Some(date) = horizon_override(&row.contract_preamble) {
            row.horizon_date = date;
        }
    }
    rows
}
