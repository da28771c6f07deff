#![forbid(unsafe_code)]
//! The fleetboard HTTP service: one snapshot slot, a periodic refresh
//! cycle, and read-only dashboard endpoints.

mod api;
mod config;
mod http;
mod state;

pub use api::{columns_from_schema, ApiErrorCode, ColumnDto, API_VERSION};
pub use config::{validate_startup_config, BackendSpec, ServerConfig};
pub use http::build_router;
pub use state::{
    build_snapshot, spawn_refresh_task, unix_now, AppState, DashboardSnapshot, SnapshotError,
};

pub const CRATE_NAME: &str = "fleetboard-server";
