#![forbid(unsafe_code)]
//! Fleetboard model SSOT.
//!
//! One row per tracked repository, columns contributed by five
//! independently produced snapshot documents. Everything downstream
//! (merger, deriver, server, CLI) consumes the types declared here.

mod document;
mod ids;
mod meta;
mod schema;
mod status;

pub use document::{
    MergedRecord, MergedTable, SourceDocument, UnitTestCounts, UNIT_TEST_TUPLE_LEN,
};
pub use ids::{
    parse_field_id, parse_project_id, parse_source_name, FieldId, ProjectId, SourceName,
    ValidationError, PROJECT_ID_MAX_LEN, SOURCE_NAME_MAX_LEN,
};
pub use meta::DashboardMeta;
pub use schema::{
    CompareRoute, DashboardSchema, FieldDef, FieldKind, SourceSchema,
};
pub use status::{PipelineStatus, PipelineStatusSet, RollupStatus};

pub const CRATE_NAME: &str = "fleetboard-model";
