//! Business logic services for the Distribution Dashboard
//!
//! This crate provides the service layer that ingests archived snapshot
//! CSVs into an immutable in-memory table and answers distribution queries
//! over it.

pub mod distribution_service;
pub mod horizon;
pub mod ingest;
pub mod rebin;
pub mod table;

pub use distribution_service::DistributionService;
pub use horizon::{apply_horizon_overrides, horizon_override};
pub use ingest::{
    default_sources, load_snapshot_file, read_snapshot_rows, IngestError, SnapshotSource,
};
pub use rebin::{rebin, RebinError};
pub use table::DistributionTable;
