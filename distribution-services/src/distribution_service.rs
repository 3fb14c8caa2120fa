//! Distribution query service
//!
//! Read-only query surface over the loaded [`DistributionTable`]. Every
//! operation is a pure function of the table and its inputs; unknown
//! contracts and categories resolve to empty results rather than errors.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use distribution_core::{Category, ContractInfo, DateSeries, DistributionSeries};
use rust_decimal::Decimal;

use crate::rebin::{rebin, RebinError};
use crate::table::DistributionTable;

/// Service answering dashboard queries against one immutable table
pub struct DistributionService {
    table: Arc<DistributionTable>,
}

impl DistributionService {
    pub fn new(table: Arc<DistributionTable>) -> Self {
        Self { table }
    }

    /// Number of rows in the underlying table
    pub fn row_count(&self) -> usize {
        self.table.len()
    }

    /// Contract preambles, newest horizon first, optionally filtered by category
    pub fn list_contracts(&self, category: Option<Category>) -> Vec<String> {
        self.table.contracts_by_horizon(category)
    }

    /// Distinct category tags present in the table
    pub fn categories(&self) -> Vec<Category> {
        self.table.categories()
    }

    /// Sorted distinct snapshot dates for one (contract, category)
    pub fn prediction_dates(&self, contract_preamble: &str, category: Category) -> Vec<NaiveDate> {
        self.table.prediction_dates(contract_preamble, category)
    }

    /// Rebinned per-date series plus every strike the contract has traded at
    ///
    /// A requested date with no rows yields an empty series for that date.
    pub fn distribution(
        &self,
        contract_preamble: &str,
        prediction_dates: &[NaiveDate],
        smallest_bin: Option<Decimal>,
        largest_bin: Option<Decimal>,
    ) -> Result<DistributionSeries, RebinError> {
        let mut data = Vec::with_capacity(prediction_dates.len());

        for &prediction_date in prediction_dates {
            let bins = rebin(
                self.table.series(contract_preamble, prediction_date),
                smallest_bin,
                largest_bin,
            )?;
            data.push(DateSeries {
                prediction_date,
                bins,
            });
        }

        Ok(DistributionSeries {
            strike_labels: self.table.strikes(contract_preamble),
            data,
        })
    }

    /// Horizon metadata for one contract; `None` when the contract is unknown
    pub fn contract_info(&self, contract_preamble: &str) -> Option<ContractInfo> {
        self.contract_info_at(contract_preamble, Utc::now().date_naive())
    }

    /// [`Self::contract_info`] with an explicit "today", for deterministic tests
    pub fn contract_info_at(
        &self,
        contract_preamble: &str,
        today: NaiveDate,
    ) -> Option<ContractInfo> {
        let (category, horizon_date) = self.table.contract_horizon(contract_preamble)?;
        let latest_prediction_date = self.table.latest_prediction_date(contract_preamble)?;

        // Only horizons that have already resolved qualify as a comparison
        // point, and only within the same category.
        let previous_horizon_date = self
            .table
            .category_horizons(category)
            .into_iter()
            .map(|(_, horizon)| horizon)
            .filter(|h| *h < horizon_date && *h < today)
            .max();

        Some(ContractInfo {
            horizon_date,
            previous_horizon_date,
            latest_prediction_date,
        })
    }
}
