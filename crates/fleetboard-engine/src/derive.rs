// SPDX-License-Identifier: Apache-2.0

use crate::links::LinkBuilder;
use crate::rollup::roll_up;
use crate::search::search_text;
use fleetboard_model::{
    DashboardSchema, FieldDef, FieldKind, MergedRecord, MergedTable, PipelineStatus,
    PipelineStatusSet, ProjectId, RollupStatus, UnitTestCounts,
};
use serde::Serialize;
use serde_json::Value;

pub(crate) const PULL_REQUEST_ID_KEY: &str = "Pull Request ID";

/// Coverage pass/fail boundary. A parameter, not a literal: tests and
/// deployments tune it without touching the classification logic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoveragePolicy {
    pub healthy_min: f64,
}

impl Default for CoveragePolicy {
    fn default() -> Self {
        Self { healthy_min: 75.0 }
    }
}

impl CoveragePolicy {
    #[must_use]
    pub fn classify(&self, percent: Option<f64>) -> CoverageCell {
        match percent {
            Some(p) if p >= self.healthy_min => CoverageCell::Healthy { percent: p },
            Some(p) => CoverageCell::NeedsAttention { percent: p },
            None => CoverageCell::NotAvailable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CoverageCell {
    Healthy { percent: f64 },
    NeedsAttention { percent: f64 },
    NotAvailable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DeltaCell {
    /// Outstanding changes, with the pre-filled new-PR page when the
    /// column declares a compare route.
    NeedsAction {
        count: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        open_pr_url: Option<String>,
    },
    Clean,
    NotAvailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum UnitTestCell {
    Counts {
        passed: u64,
        skipped: u64,
        failed: u64,
        total: u64,
    },
    NotAvailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchLink {
    pub name: String,
    pub browse_url: String,
}

/// Both views of a list-valued cell are always emitted; the renderer
/// picks one via its [`crate::ExpandState`] map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchListCell {
    pub count: usize,
    pub expanded: Vec<BranchLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestLink {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestField {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestDetail {
    pub id: String,
    pub url: String,
    pub fields: Vec<PullRequestField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestListCell {
    pub count: usize,
    pub collapsed: Vec<PullRequestLink>,
    pub expanded: Vec<PullRequestDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
    pub count: usize,
    pub label: String,
    pub rollup: RollupStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubPipeline {
    pub name: String,
    pub status: PipelineStatus,
    pub view_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum PipelineCell {
    /// The raw value was a single scalar status string.
    Single {
        pipeline: String,
        status: PipelineStatus,
        view_url: String,
    },
    /// The raw value mapped sub-pipeline names to statuses.
    Group {
        summary: PipelineSummary,
        detail: Vec<SubPipeline>,
    },
    NotAvailable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DerivedCell {
    Repository {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        browse_url: Option<String>,
    },
    Tags {
        tags: Vec<String>,
    },
    Delta(DeltaCell),
    Coverage(CoverageCell),
    UnitTests(UnitTestCell),
    Branches(BranchListCell),
    PullRequests(PullRequestListCell),
    Pipeline(PipelineCell),
}

/// One display-ready row: a cell per declared column plus the per-cell
/// search text the tabular view filters on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedRow {
    pub project: ProjectId,
    pub cells: Vec<DerivedCell>,
    pub search: Vec<String>,
}

/// Derives every row of a merged table in key order.
#[must_use]
pub fn derive_rows(
    schema: &DashboardSchema,
    table: &MergedTable,
    links: &LinkBuilder,
    policy: &CoveragePolicy,
) -> Vec<DerivedRow> {
    table
        .records()
        .iter()
        .map(|(project, record)| derive_row(schema, project, record, links, policy))
        .collect()
}

/// Pure per-field derivation; always produces a cell, never an error.
#[must_use]
pub fn derive_row(
    schema: &DashboardSchema,
    project: &ProjectId,
    record: &MergedRecord,
    links: &LinkBuilder,
    policy: &CoveragePolicy,
) -> DerivedRow {
    let defs = schema.field_defs();
    let mut cells = Vec::with_capacity(defs.len());
    let mut search = Vec::with_capacity(defs.len());
    for (def, raw) in defs.iter().zip(record.values()) {
        cells.push(derive_cell(def, project, raw, links, policy));
        search.push(search_text(def.kind, raw));
    }
    DerivedRow {
        project: project.clone(),
        cells,
        search,
    }
}

fn derive_cell(
    def: &FieldDef,
    project: &ProjectId,
    raw: &Value,
    links: &LinkBuilder,
    policy: &CoveragePolicy,
) -> DerivedCell {
    match def.kind {
        FieldKind::Repository => {
            let name = raw.as_str().map(ToString::to_string);
            let browse_url = name.as_ref().map(|_| links.repository_browse(project));
            DerivedCell::Repository { name, browse_url }
        }
        FieldKind::Tags => DerivedCell::Tags {
            tags: string_items(raw),
        },
        FieldKind::Delta => DerivedCell::Delta(match raw.as_i64() {
            Some(count) if count > 0 => DeltaCell::NeedsAction {
                count: count as u64,
                open_pr_url: def
                    .compare
                    .as_ref()
                    .map(|route| links.open_pull_request(project, route)),
            },
            Some(0) => DeltaCell::Clean,
            _ => DeltaCell::NotAvailable,
        }),
        FieldKind::Coverage => DerivedCell::Coverage(policy.classify(raw.as_f64())),
        FieldKind::UnitTests => DerivedCell::UnitTests(match UnitTestCounts::from_value(raw) {
            Ok(counts) => UnitTestCell::Counts {
                passed: counts.passed,
                skipped: counts.skipped,
                failed: counts.failed,
                total: counts.total,
            },
            Err(_) => UnitTestCell::NotAvailable,
        }),
        FieldKind::BranchList => {
            let names = string_items(raw);
            let expanded = names
                .into_iter()
                .map(|name| {
                    let browse_url = links.branch_browse(project, &name);
                    BranchLink { name, browse_url }
                })
                .collect::<Vec<_>>();
            DerivedCell::Branches(BranchListCell {
                count: expanded.len(),
                expanded,
            })
        }
        FieldKind::PullRequestList => {
            DerivedCell::PullRequests(derive_pull_requests(project, raw, links))
        }
        FieldKind::Pipeline => DerivedCell::Pipeline(derive_pipeline(project, raw, links)),
        _ => unreachable!("unhandled FieldKind variant in derive_cell"),
    }
}

fn derive_pull_requests(
    project: &ProjectId,
    raw: &Value,
    links: &LinkBuilder,
) -> PullRequestListCell {
    let entries = raw.as_array().map(Vec::as_slice).unwrap_or_default();
    let mut collapsed = Vec::with_capacity(entries.len());
    let mut expanded = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(detail) = entry.as_object() else {
            continue;
        };
        let id = detail
            .get(PULL_REQUEST_ID_KEY)
            .map(value_display)
            .unwrap_or_default();
        let url = links.pull_request(project, &id);
        collapsed.push(PullRequestLink {
            id: id.clone(),
            url: url.clone(),
        });
        expanded.push(PullRequestDetail {
            id,
            url,
            fields: detail
                .iter()
                .map(|(label, value)| PullRequestField {
                    label: label.clone(),
                    value: value_display(value),
                })
                .collect(),
        });
    }
    PullRequestListCell {
        count: collapsed.len(),
        collapsed,
        expanded,
    }
}

fn derive_pipeline(project: &ProjectId, raw: &Value, links: &LinkBuilder) -> PipelineCell {
    match raw {
        Value::String(status) => {
            let pipeline = LinkBuilder::default_pipeline_name(project);
            let view_url = links.pipeline_view(&pipeline);
            PipelineCell::Single {
                pipeline,
                status: PipelineStatus::parse(status),
                view_url,
            }
        }
        Value::Object(entries) => {
            let statuses: PipelineStatusSet = entries
                .iter()
                .map(|(name, status)| {
                    (
                        name.clone(),
                        status
                            .as_str()
                            .map(PipelineStatus::parse)
                            .unwrap_or(PipelineStatus::NotAvailable),
                    )
                })
                .collect();
            let count = statuses.len();
            let label = if count == 1 {
                "1 Pipeline".to_string()
            } else {
                format!("{count} Pipelines")
            };
            let detail = statuses
                .iter()
                .map(|(name, status)| SubPipeline {
                    name: name.clone(),
                    status: *status,
                    view_url: links.pipeline_view(name),
                })
                .collect();
            PipelineCell::Group {
                summary: PipelineSummary {
                    count,
                    label,
                    rollup: roll_up(&statuses),
                },
                detail,
            }
        }
        _ => PipelineCell::NotAvailable,
    }
}

pub(crate) fn string_items(raw: &Value) -> Vec<String> {
    raw.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn value_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
