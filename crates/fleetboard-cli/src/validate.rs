// SPDX-License-Identifier: Apache-2.0

use fleetboard_engine::merge;
use fleetboard_model::{
    DashboardMeta, DashboardSchema, FieldKind, SourceDocument, SourceName, SourceSchema,
    UnitTestCounts,
};
use fleetboard_store::{SnapshotBackend, StoreErrorCode, META_SOURCE};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// One shape-contract breach. A source that is simply absent is not a
/// violation; that is the expected degradation path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub source: String,
    pub message: String,
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.source, self.message)
    }
}

/// The fail-fast construction path: parses all five documents, replays
/// the merge to catch arity breaches, and checks every present unit-test
/// tuple, reporting what the render path would otherwise quietly blank.
pub async fn validate_snapshots(
    backend: &dyn SnapshotBackend,
    schema: &DashboardSchema,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    match backend.fetch(META_SOURCE).await {
        Ok(bytes) => {
            if let Err(e) = serde_json::from_slice::<DashboardMeta>(&bytes) {
                violations.push(Violation {
                    source: META_SOURCE.to_string(),
                    message: format!("parse failed: {e}"),
                });
            }
        }
        Err(e) if e.code == StoreErrorCode::NotFound => {}
        Err(e) => violations.push(Violation {
            source: META_SOURCE.to_string(),
            message: e.to_string(),
        }),
    }

    let base = fetch_document(backend, schema.base().name(), &mut violations).await;
    let mut supplements: Vec<(SourceName, SourceDocument)> = Vec::new();
    for supplement in schema.supplements() {
        let document = fetch_document(backend, supplement.name(), &mut violations).await;
        supplements.push((supplement.name().clone(), document));
    }

    if let Err(e) = merge(schema, &base, &supplements) {
        violations.push(Violation {
            source: schema.base().name().as_str().to_string(),
            message: e.to_string(),
        });
    }

    check_unit_test_tuples(schema.base(), &base, &mut violations);
    for (source, (_, document)) in schema.supplements().iter().zip(&supplements) {
        check_unit_test_tuples(source, document, &mut violations);
    }

    violations
}

async fn fetch_document(
    backend: &dyn SnapshotBackend,
    name: &SourceName,
    violations: &mut Vec<Violation>,
) -> SourceDocument {
    match backend.fetch(name.as_str()).await {
        Ok(bytes) => match serde_json::from_slice::<SourceDocument>(&bytes) {
            Ok(document) => document,
            Err(e) => {
                violations.push(Violation {
                    source: name.as_str().to_string(),
                    message: format!("parse failed: {e}"),
                });
                SourceDocument::empty()
            }
        },
        Err(e) if e.code == StoreErrorCode::NotFound => SourceDocument::empty(),
        Err(e) => {
            violations.push(Violation {
                source: name.as_str().to_string(),
                message: e.to_string(),
            });
            SourceDocument::empty()
        }
    }
}

fn check_unit_test_tuples(
    source: &SourceSchema,
    document: &SourceDocument,
    violations: &mut Vec<Violation>,
) {
    let unit_test_indexes: Vec<usize> = source
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, f)| f.kind == FieldKind::UnitTests)
        .map(|(idx, _)| idx)
        .collect();
    if unit_test_indexes.is_empty() {
        return;
    }
    for (project, fields) in document.iter() {
        for idx in &unit_test_indexes {
            let Some(value) = fields.get(*idx) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            if let Err(e) = UnitTestCounts::from_value(value) {
                violations.push(Violation {
                    source: source.name().as_str().to_string(),
                    message: format!("{project}: {e}"),
                });
            }
        }
    }
}
