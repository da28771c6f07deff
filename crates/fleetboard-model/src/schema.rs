// SPDX-License-Identifier: Apache-2.0

use crate::ids::{FieldId, SourceName, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What a column holds, driving derivation and search-text extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum FieldKind {
    Repository,
    Tags,
    Delta,
    BranchList,
    PullRequestList,
    Coverage,
    UnitTests,
    Pipeline,
}

/// Branch pair a delta counter compares, used to build the open-PR link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompareRoute {
    pub base_ref: String,
    pub head_ref: String,
}

impl CompareRoute {
    #[must_use]
    pub fn staging() -> Self {
        Self {
            base_ref: "int".to_string(),
            head_ref: "dev".to_string(),
        }
    }

    #[must_use]
    pub fn production() -> Self {
        Self {
            base_ref: "prod".to_string(),
            head_ref: "int".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDef {
    pub id: FieldId,
    pub title: String,
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare: Option<CompareRoute>,
}

impl FieldDef {
    pub fn new(id: &str, title: &str, kind: FieldKind) -> Result<Self, ValidationError> {
        Ok(Self {
            id: FieldId::parse(id)?,
            title: title.to_string(),
            kind,
            group: None,
            compare: None,
        })
    }

    #[must_use]
    pub fn with_group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    #[must_use]
    pub fn with_compare(mut self, compare: CompareRoute) -> Self {
        self.compare = Some(compare);
        self
    }
}

/// One snapshot source's contribution: a name plus a fixed run of columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceSchema {
    name: SourceName,
    arity: usize,
    fields: Vec<FieldDef>,
}

impl SourceSchema {
    pub fn new(name: &str, fields: Vec<FieldDef>) -> Result<Self, ValidationError> {
        if fields.is_empty() {
            return Err(ValidationError(format!(
                "source {name} must contribute at least one field"
            )));
        }
        let arity = fields.len();
        Ok(Self {
            name: SourceName::parse(name)?,
            arity,
            fields,
        })
    }

    #[must_use]
    pub fn name(&self) -> &SourceName {
        &self.name
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.arity
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }
}

/// The declared column schema: base source first, then each supplement in
/// merge order. Both the record merger and column-definition construction
/// consume this, so field alignment is verified once, centrally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSchema {
    base: SourceSchema,
    supplements: Vec<SourceSchema>,
}

impl DashboardSchema {
    pub fn new(
        base: SourceSchema,
        supplements: Vec<SourceSchema>,
    ) -> Result<Self, ValidationError> {
        let mut source_names = BTreeSet::new();
        let mut field_ids = BTreeSet::new();
        for source in std::iter::once(&base).chain(supplements.iter()) {
            if !source_names.insert(source.name().clone()) {
                return Err(ValidationError(format!(
                    "duplicate source name in schema: {}",
                    source.name()
                )));
            }
            for field in source.fields() {
                if !field_ids.insert(field.id.clone()) {
                    return Err(ValidationError(format!(
                        "duplicate field id in schema: {}",
                        field.id
                    )));
                }
            }
        }
        Ok(Self { base, supplements })
    }

    /// The shipped dashboard version: six base columns from the
    /// repositories snapshot, then coverage, unit tests, and pipelines.
    #[must_use]
    pub fn standard() -> Self {
        let base = SourceSchema::new(
            "repositories",
            vec![
                FieldDef::new("project_name", "Repository Name", FieldKind::Repository)
                    .expect("static field"),
                FieldDef::new("tags", "Repository Tags", FieldKind::Tags).expect("static field"),
                FieldDef::new("staging_delta", "Master -> Dev", FieldKind::Delta)
                    .expect("static field")
                    .with_group("Outstanding Changes")
                    .with_compare(CompareRoute::staging()),
                FieldDef::new("production_delta", "Dev -> Prod", FieldKind::Delta)
                    .expect("static field")
                    .with_group("Outstanding Changes")
                    .with_compare(CompareRoute::production()),
                FieldDef::new("branches", "Branches", FieldKind::BranchList)
                    .expect("static field"),
                FieldDef::new("pull_requests", "Open Pull Requests", FieldKind::PullRequestList)
                    .expect("static field"),
            ],
        )
        .expect("static base schema");
        let coverage = SourceSchema::new(
            "coverage",
            vec![
                FieldDef::new("line_coverage", "Line", FieldKind::Coverage)
                    .expect("static field")
                    .with_group("Code Coverage"),
                FieldDef::new("branch_coverage", "Branch", FieldKind::Coverage)
                    .expect("static field")
                    .with_group("Code Coverage"),
            ],
        )
        .expect("static coverage schema");
        let unit_tests = SourceSchema::new(
            "unit_tests",
            vec![FieldDef::new("unit_tests", "Unit Tests", FieldKind::UnitTests)
                .expect("static field")],
        )
        .expect("static unit test schema");
        let pipelines = SourceSchema::new(
            "pipelines",
            vec![FieldDef::new("pipeline_status", "Pipeline Status", FieldKind::Pipeline)
                .expect("static field")
                .with_group("Pipeline Status")],
        )
        .expect("static pipeline schema");
        Self::new(base, vec![coverage, unit_tests, pipelines]).expect("static schema")
    }

    #[must_use]
    pub fn base(&self) -> &SourceSchema {
        &self.base
    }

    #[must_use]
    pub fn supplements(&self) -> &[SourceSchema] {
        &self.supplements
    }

    /// Sum of per-source arities; every merged record has exactly this length.
    #[must_use]
    pub fn total_arity(&self) -> usize {
        self.base.arity() + self.supplements.iter().map(SourceSchema::arity).sum::<usize>()
    }

    /// All column definitions, base first then supplements in declared order.
    #[must_use]
    pub fn field_defs(&self) -> Vec<&FieldDef> {
        self.base
            .fields()
            .iter()
            .chain(self.supplements.iter().flat_map(|s| s.fields().iter()))
            .collect()
    }

    /// Index of a source's first column in the merged record.
    #[must_use]
    pub fn field_offset(&self, name: &SourceName) -> Option<usize> {
        if self.base.name() == name {
            return Some(0);
        }
        let mut offset = self.base.arity();
        for supplement in &self.supplements {
            if supplement.name() == name {
                return Some(offset);
            }
            offset += supplement.arity();
        }
        None
    }

    /// Index of one column in the merged record.
    #[must_use]
    pub fn field_index(&self, id: &FieldId) -> Option<usize> {
        self.field_defs().iter().position(|f| &f.id == id)
    }
}
