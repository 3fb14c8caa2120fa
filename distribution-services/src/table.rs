//! In-memory distribution table
//!
//! The merged, immutable collection of all normalized snapshot rows across
//! every configured source. Built once at startup; every query afterwards is
//! a pure read, so the table can be shared freely between request handlers.
//! A refresh feature would have to build a fresh table and swap the shared
//! reference, never mutate this one.

use chrono::NaiveDate;
use distribution_core::{Category, DistributionRow, StrikeBin};
use itertools::Itertools;
use rust_decimal::Decimal;
use tracing::info;

use crate::horizon::apply_horizon_overrides;
use crate::ingest::{load_snapshot_file, IngestError, SnapshotSource};

/// Queryable table of every ingested distribution row
pub struct DistributionTable {
    rows: Vec<DistributionRow>,
}

impl DistributionTable {
    /// Ingest every configured source and concatenate the results
    ///
    /// Horizon overrides apply to the rate-level category only; other
    /// categories keep their nominal expiry as the horizon.
    pub fn load(sources: &[SnapshotSource]) -> Result<Self, IngestError> {
        let mut rows = Vec::new();

        for source in sources {
            let mut source_rows = load_snapshot_file(source)?;
            if source.category == Category::FedLevels {
                source_rows = apply_horizon_overrides(source_rows);
            }
            rows.extend(source_rows);
        }

        info!("Distribution table built with {} rows", rows.len());
        Ok(Self { rows })
    }

    /// Build a table directly from rows (overrides already applied)
    pub fn from_rows(rows: Vec<DistributionRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct contract preambles, newest horizon first
    pub fn contracts_by_horizon(&self, category: Option<Category>) -> Vec<String> {
        self.rows
            .iter()
            .filter(|r| category.map_or(true, |c| r.category == c))
            .map(|r| (r.contract_preamble.as_str(), r.horizon_date))
            .unique()
            .sorted_by(|a, b| b.1.cmp(&a.1))
            .map(|(preamble, _)| preamble.to_string())
            .collect()
    }

    /// Distinct categories, in first-observation order
    pub fn categories(&self) -> Vec<Category> {
        self.rows.iter().map(|r| r.category).unique().collect()
    }

    /// Sorted distinct prediction dates for one (contract, category)
    pub fn prediction_dates(&self, contract_preamble: &str, category: Category) -> Vec<NaiveDate> {
        self.rows
            .iter()
            .filter(|r| r.category == category && r.contract_preamble == contract_preamble)
            .map(|r| r.prediction_date)
            .unique()
            .sorted()
            .collect()
    }

    /// Raw (strike, probability) pairs for one snapshot
    pub fn series(&self, contract_preamble: &str, prediction_date: NaiveDate) -> Vec<StrikeBin> {
        self.rows
            .iter()
            .filter(|r| {
                r.contract_preamble == contract_preamble && r.prediction_date == prediction_date
            })
            .map(|r| StrikeBin {
                strike: r.strike,
                probability: r.probability,
            })
            .collect()
    }

    /// Sorted distinct strikes ever observed for a contract
    pub fn strikes(&self, contract_preamble: &str) -> Vec<Decimal> {
        self.rows
            .iter()
            .filter(|r| r.contract_preamble == contract_preamble)
            .map(|r| r.strike)
            .unique()
            .sorted()
            .collect()
    }

    /// The (category, horizon) shared by a contract's rows, if the contract exists
    pub fn contract_horizon(&self, contract_preamble: &str) -> Option<(Category, NaiveDate)> {
        self.rows
            .iter()
            .find(|r| r.contract_preamble == contract_preamble)
            .map(|r| (r.category, r.horizon_date))
    }

    /// Most recent snapshot date observed for a contract
    pub fn latest_prediction_date(&self, contract_preamble: &str) -> Option<NaiveDate> {
        self.rows
            .iter()
            .filter(|r| r.contract_preamble == contract_preamble)
            .map(|r| r.prediction_date)
            .max()
    }

    /// Distinct (contract, horizon) pairs within one category
    pub fn category_horizons(&self, category: Category) -> Vec<(String, NaiveDate)> {
        self.rows
            .iter()
            .filter(|r| r.category == category)
            .map(|r| (r.contract_preamble.clone(), r.horizon_date))
            .unique()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(
        category: Category,
        contract: &str,
        prediction: &str,
        horizon: &str,
        strike: Decimal,
        probability: Decimal,
    ) -> DistributionRow {
        DistributionRow {
            category,
            contract_preamble: contract.to_string(),
            prediction_date: prediction.parse().unwrap(),
            horizon_date: horizon.parse().unwrap(),
            strike,
            probability,
        }
    }

    fn sample_table() -> DistributionTable {
        DistributionTable::from_rows(vec![
            row(
                Category::FedLevels,
                "FED-25SEP",
                "2025-07-01",
                "2025-09-17",
                dec!(4.125),
                dec!(0.4),
            ),
            row(
                Category::FedLevels,
                "FED-25SEP",
                "2025-07-01",
                "2025-09-17",
                dec!(4.375),
                dec!(0.6),
            ),
            row(
                Category::FedLevels,
                "FED-25SEP",
                "2025-07-02",
                "2025-09-17",
                dec!(4.375),
                dec!(1.0),
            ),
            row(
                Category::FedLevels,
                "FED-25JUL",
                "2025-07-01",
                "2025-07-30",
                dec!(4.375),
                dec!(1.0),
            ),
            row(
                Category::HeadlineCpiReleases,
                "CPI-25JUN",
                "2025-07-01",
                "2025-07-15",
                dec!(0.3),
                dec!(1.0),
            ),
        ])
    }

    #[test]
    fn test_contracts_ordered_newest_horizon_first() {
        let table = sample_table();

        assert_eq!(
            table.contracts_by_horizon(Some(Category::FedLevels)),
            vec!["FED-25SEP".to_string(), "FED-25JUL".to_string()]
        );
        assert_eq!(
            table.contracts_by_horizon(None),
            vec![
                "FED-25SEP".to_string(),
                "FED-25JUL".to_string(),
                "CPI-25JUN".to_string()
            ]
        );
    }

    #[test]
    fn test_prediction_dates_sorted_distinct() {
        let table = sample_table();

        assert_eq!(
            table.prediction_dates("FED-25SEP", Category::FedLevels),
            vec![
                "2025-07-01".parse::<NaiveDate>().unwrap(),
                "2025-07-02".parse::<NaiveDate>().unwrap()
            ]
        );
        // Same contract under the wrong category matches nothing
        assert!(table
            .prediction_dates("FED-25SEP", Category::HeadlineCpiReleases)
            .is_empty());
    }

    #[test]
    fn test_series_and_strikes() {
        let table = sample_table();

        let series = table.series("FED-25SEP", "2025-07-01".parse().unwrap());
        assert_eq!(series.len(), 2);

        assert_eq!(
            table.strikes("FED-25SEP"),
            vec![dec!(4.125), dec!(4.375)]
        );
    }

    #[test]
    fn test_unknown_contract_yields_empty_results() {
        let table = sample_table();

        assert!(table.series("FED-99DEC", "2025-07-01".parse().unwrap()).is_empty());
        assert!(table.strikes("FED-99DEC").is_empty());
        assert!(table.contract_horizon("FED-99DEC").is_none());
        assert!(table.latest_prediction_date("FED-99DEC").is_none());
    }

    #[test]
    fn test_categories_distinct() {
        let table = sample_table();

        assert_eq!(
            table.categories(),
            vec![Category::FedLevels, Category::HeadlineCpiReleases]
        );
    }
}
