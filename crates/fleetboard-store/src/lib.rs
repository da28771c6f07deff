#![forbid(unsafe_code)]
//! Snapshot retrieval for fleetboard.
//!
//! Five documents, fetched concurrently, joined at a barrier; any one of
//! them failing to fetch or parse degrades to an empty document rather
//! than failing the cycle.

mod backend;
mod load;
mod retry;

pub use backend::{HttpBackend, LocalFsBackend, SnapshotBackend, StoreError, StoreErrorCode};
pub use load::{load_cycle, DegradedSource, LoadReport, LoadedSnapshots, META_SOURCE};
pub use retry::{BackoffPolicy, RetryPolicy};

pub const CRATE_NAME: &str = "fleetboard-store";
