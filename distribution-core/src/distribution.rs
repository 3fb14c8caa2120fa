//! Distribution data structures
//!
//! A snapshot is the market-implied probability mass function observed on one
//! prediction date for one contract family, supported on discrete strikes.

use crate::category::Category;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One observation of market-implied probability at a strike level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionRow {
    /// Which source family this row came from
    pub category: Category,

    /// Contract family sharing one underlying event (e.g. "FED-25JUL")
    pub contract_preamble: String,

    /// Calendar date the snapshot was taken
    pub prediction_date: NaiveDate,

    /// Calendar date the underlying event resolves (post-override)
    pub horizon_date: NaiveDate,

    /// Support point of the mass function (rate level, CPI percentage, ...)
    pub strike: Decimal,

    /// Mass assigned to `strike` by the market on `prediction_date`
    pub probability: Decimal,
}

/// A single (strike, probability) support point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrikeBin {
    pub strike: Decimal,
    pub probability: Decimal,
}

/// Rebinned series for one requested prediction date
///
/// `bins` is empty when the contract has no rows on that date.
#[derive(Debug, Clone, Serialize)]
pub struct DateSeries {
    pub prediction_date: NaiveDate,
    pub bins: Vec<StrikeBin>,
}

/// Result of a distribution query across one or two prediction dates
#[derive(Debug, Clone, Serialize)]
pub struct DistributionSeries {
    /// Every strike ever observed for the contract, ascending
    pub strike_labels: Vec<Decimal>,

    /// One rebinned series per requested date, in request order
    pub data: Vec<DateSeries>,
}

/// Horizon metadata for one contract family
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractInfo {
    /// The horizon shared by all of the contract's rows
    pub horizon_date: NaiveDate,

    /// Latest already-resolved horizon in the same category, if any
    pub previous_horizon_date: Option<NaiveDate>,

    /// Most recent snapshot date observed for the contract
    pub latest_prediction_date: NaiveDate,
}
