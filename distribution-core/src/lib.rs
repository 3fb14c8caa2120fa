//! Core types for the Distribution Dashboard
//!
//! This crate defines the shared data structures used across the service,
//! including normalized snapshot rows, rebinned series, and category tags.

pub mod category;
pub mod distribution;

pub use category::Category;
pub use distribution::{
    ContractInfo, DateSeries, DistributionRow, DistributionSeries, StrikeBin,
};
