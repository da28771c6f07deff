// SPDX-License-Identifier: Apache-2.0

use fleetboard_model::{
    DashboardSchema, MergedRecord, MergedTable, ProjectId, SourceDocument, SourceName,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Construction-time defects in a load cycle's inputs. A missing key in a
/// supplement is NOT one of these; that is the expected padding case.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MergeError {
    /// Supplement documents do not pair up with the declared schema.
    SchemaMismatch { expected: String, got: String },
    /// A present entry's field count contradicts its source's arity.
    ArityViolation {
        source: SourceName,
        project: ProjectId,
        expected: usize,
        got: usize,
    },
}

impl Display for MergeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SchemaMismatch { expected, got } => {
                write!(f, "supplement order mismatch: expected {expected}, got {got}")
            }
            Self::ArityViolation {
                source,
                project,
                expected,
                got,
            } => write!(
                f,
                "source {source} entry for {project} has {got} fields, declared arity is {expected}"
            ),
        }
    }
}

impl std::error::Error for MergeError {}

/// Joins the base document with each supplement in declared order.
///
/// The base document defines the universe of rows. For every project and
/// every supplement, a present entry contributes exactly its declared
/// arity of fields; an absent entry contributes that many `Value::Null`
/// markers instead. A supplement that failed to load arrives here as an
/// empty document and degenerates to the per-key miss for every row.
pub fn merge(
    schema: &DashboardSchema,
    base: &SourceDocument,
    supplements: &[(SourceName, SourceDocument)],
) -> Result<MergedTable, MergeError> {
    if supplements.len() != schema.supplements().len() {
        return Err(MergeError::SchemaMismatch {
            expected: schema
                .supplements()
                .iter()
                .map(|s| s.name().as_str().to_string())
                .collect::<Vec<_>>()
                .join(","),
            got: supplements
                .iter()
                .map(|(name, _)| name.as_str().to_string())
                .collect::<Vec<_>>()
                .join(","),
        });
    }
    for (declared, (provided, _)) in schema.supplements().iter().zip(supplements) {
        if declared.name() != provided {
            return Err(MergeError::SchemaMismatch {
                expected: declared.name().as_str().to_string(),
                got: provided.as_str().to_string(),
            });
        }
    }

    let mut records = BTreeMap::new();
    for (project, base_fields) in base.iter() {
        if base_fields.len() != schema.base().arity() {
            return Err(MergeError::ArityViolation {
                source: schema.base().name().clone(),
                project: project.clone(),
                expected: schema.base().arity(),
                got: base_fields.len(),
            });
        }
        let mut fields = Vec::with_capacity(schema.total_arity());
        fields.extend(base_fields.iter().cloned());
        for (declared, (_, document)) in schema.supplements().iter().zip(supplements) {
            match document.get(project) {
                Some(entry) if entry.len() == declared.arity() => {
                    fields.extend(entry.iter().cloned());
                }
                Some(entry) => {
                    return Err(MergeError::ArityViolation {
                        source: declared.name().clone(),
                        project: project.clone(),
                        expected: declared.arity(),
                        got: entry.len(),
                    });
                }
                None => {
                    fields.extend(std::iter::repeat(Value::Null).take(declared.arity()));
                }
            }
        }
        records.insert(project.clone(), MergedRecord::new(fields));
    }
    Ok(MergedTable::new(schema.total_arity(), records))
}
