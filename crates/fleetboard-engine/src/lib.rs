#![forbid(unsafe_code)]
//! The fleetboard core: joins the five snapshot documents into one row
//! per project and derives display-ready cells from the raw fields.
//!
//! Everything in this crate is deterministic and clock-free; callers
//! supply `now` where elapsed time is reported.

pub mod canonical;
mod derive;
mod freshness;
mod links;
mod merge;
mod rollup;
mod search;
mod view;

pub use derive::{
    derive_row, derive_rows, BranchLink, BranchListCell, CoverageCell, CoveragePolicy, DeltaCell,
    DerivedCell, DerivedRow, PipelineCell, PipelineSummary, PullRequestDetail, PullRequestField,
    PullRequestLink, PullRequestListCell, SubPipeline, UnitTestCell,
};
pub use freshness::{elapsed_description, refreshed_banner};
pub use links::LinkBuilder;
pub use merge::{merge, MergeError};
pub use rollup::roll_up;
pub use search::search_text;
pub use view::ExpandState;

pub const CRATE_NAME: &str = "fleetboard-engine";
