// SPDX-License-Identifier: Apache-2.0

use crate::ids::{ProjectId, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One snapshot document: project id -> ordered tuple of raw field values.
///
/// Backed by a `BTreeMap` so document and merge iteration order is
/// deterministic; re-running a merge on identical inputs yields
/// byte-identical output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceDocument(BTreeMap<ProjectId, Vec<Value>>);

impl SourceDocument {
    /// The substitution value for a source that failed to fetch or parse.
    #[must_use]
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    #[must_use]
    pub fn from_map(entries: BTreeMap<ProjectId, Vec<Value>>) -> Self {
        Self(entries)
    }

    #[must_use]
    pub fn get(&self, project: &ProjectId) -> Option<&[Value]> {
        self.0.get(project).map(Vec::as_slice)
    }

    pub fn insert(&mut self, project: ProjectId, fields: Vec<Value>) {
        self.0.insert(project, fields);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProjectId, &Vec<Value>)> {
        self.0.iter()
    }

    pub fn projects(&self) -> impl Iterator<Item = &ProjectId> {
        self.0.keys()
    }
}

/// One project's merged row: base fields then each supplement's fields in
/// declared source order. The absent-value marker is `Value::Null`,
/// repeated to the missing source's arity, never omission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MergedRecord(Vec<Value>);

impl MergedRecord {
    #[must_use]
    pub fn new(fields: Vec<Value>) -> Self {
        Self(fields)
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }
}

/// All merged rows of one load cycle, keyed by project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedTable {
    total_arity: usize,
    records: BTreeMap<ProjectId, MergedRecord>,
}

impl MergedTable {
    #[must_use]
    pub fn new(total_arity: usize, records: BTreeMap<ProjectId, MergedRecord>) -> Self {
        Self {
            total_arity,
            records,
        }
    }

    #[must_use]
    pub fn total_arity(&self) -> usize {
        self.total_arity
    }

    #[must_use]
    pub fn records(&self) -> &BTreeMap<ProjectId, MergedRecord> {
        &self.records
    }

    #[must_use]
    pub fn get(&self, project: &ProjectId) -> Option<&MergedRecord> {
        self.records.get(project)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub const UNIT_TEST_TUPLE_LEN: usize = 4;

/// Unit-test summary: the upstream 4-tuple `[passed, skipped, failed, total]`.
///
/// The arity contract is enforced here, at construction, so render paths
/// never have to reject a malformed tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitTestCounts {
    pub passed: u64,
    pub skipped: u64,
    pub failed: u64,
    pub total: u64,
}

impl UnitTestCounts {
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let items = value.as_array().ok_or_else(|| {
            ValidationError(format!("unit test summary must be an array, got {value}"))
        })?;
        if items.len() != UNIT_TEST_TUPLE_LEN {
            return Err(ValidationError(format!(
                "unit test summary must have exactly {UNIT_TEST_TUPLE_LEN} counts, got {}",
                items.len()
            )));
        }
        let count = |idx: usize, label: &str| {
            items[idx].as_u64().ok_or_else(|| {
                ValidationError(format!(
                    "unit test {label} count must be a non-negative integer, got {}",
                    items[idx]
                ))
            })
        };
        Ok(Self {
            passed: count(0, "passed")?,
            skipped: count(1, "skipped")?,
            failed: count(2, "failed")?,
            total: count(3, "total")?,
        })
    }

    #[must_use]
    pub fn to_value(self) -> Value {
        Value::from(vec![self.passed, self.skipped, self.failed, self.total])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unit_test_counts_enforce_the_four_tuple() {
        let counts = UnitTestCounts::from_value(&json!([10, 2, 1, 13])).expect("4-tuple");
        assert_eq!(counts.passed, 10);
        assert_eq!(counts.skipped, 2);
        assert_eq!(counts.failed, 1);
        assert_eq!(counts.total, 13);

        assert!(UnitTestCounts::from_value(&json!([10, 2, 1])).is_err());
        assert!(UnitTestCounts::from_value(&json!([10, 2, 1, 13, 0])).is_err());
        assert!(UnitTestCounts::from_value(&json!({"passed": 10})).is_err());
        assert!(UnitTestCounts::from_value(&json!([10, -2, 1, 13])).is_err());
    }

    #[test]
    fn source_document_deserializes_the_upstream_mapping_shape() {
        let doc: SourceDocument = serde_json::from_value(json!({
            "svc-alpha": ["svc-alpha", ["platform"], 2, 0],
            "svc-beta": ["svc-beta", [], 0, 0],
        }))
        .expect("document");
        assert_eq!(doc.len(), 2);
        let alpha = ProjectId::parse("svc-alpha").expect("id");
        assert_eq!(doc.get(&alpha).map(<[Value]>::len), Some(4));
    }
}
