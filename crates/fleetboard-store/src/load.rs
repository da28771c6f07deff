// SPDX-License-Identifier: Apache-2.0

use crate::backend::SnapshotBackend;
use fleetboard_model::{DashboardMeta, DashboardSchema, SourceDocument, SourceName};
use futures::future::join_all;
use serde::Serialize;
use tracing::warn;

/// Document name of the metadata snapshot; the remaining names come from
/// the declared schema.
pub const META_SOURCE: &str = "dashboard-meta";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegradedSource {
    pub source: String,
    pub reason: String,
}

/// Which sources were substituted with empty documents this cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub degraded: Vec<DegradedSource>,
}

impl LoadReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.degraded.is_empty()
    }

    fn record(&mut self, source: &str, reason: String) {
        warn!(source, %reason, "snapshot source degraded to empty document");
        self.degraded.push(DegradedSource {
            source: source.to_string(),
            reason,
        });
    }
}

/// Everything one load cycle produced, ready for the merger.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSnapshots {
    pub meta: DashboardMeta,
    pub base: SourceDocument,
    pub supplements: Vec<(SourceName, SourceDocument)>,
    pub report: LoadReport,
}

/// Fetches all five documents concurrently and joins at a barrier.
///
/// No individual failure propagates: a document that cannot be fetched or
/// parsed is replaced by an empty document (metadata by its default) and
/// noted in the report. Downstream, the gap surfaces only as
/// "not available" cells.
pub async fn load_cycle(
    backend: &dyn SnapshotBackend,
    schema: &DashboardSchema,
) -> LoadedSnapshots {
    let mut names: Vec<String> = vec![META_SOURCE.to_string()];
    names.push(schema.base().name().as_str().to_string());
    for supplement in schema.supplements() {
        names.push(supplement.name().as_str().to_string());
    }

    let fetches = names.iter().map(|name| backend.fetch(name));
    let mut results = join_all(fetches).await.into_iter();
    let mut report = LoadReport::default();

    let meta = match results.next() {
        Some(Ok(bytes)) => match serde_json::from_slice::<DashboardMeta>(&bytes) {
            Ok(meta) => meta,
            Err(e) => {
                report.record(META_SOURCE, format!("parse failed: {e}"));
                DashboardMeta::default()
            }
        },
        Some(Err(e)) => {
            report.record(META_SOURCE, e.to_string());
            DashboardMeta::default()
        }
        None => DashboardMeta::default(),
    };

    let mut documents = Vec::with_capacity(names.len() - 1);
    for (name, result) in names.iter().skip(1).zip(results) {
        documents.push(decode_document(name, result, &mut report));
    }
    let mut documents = documents.into_iter();
    let base = documents.next().unwrap_or_else(SourceDocument::empty);
    let supplements = schema
        .supplements()
        .iter()
        .map(|s| s.name().clone())
        .zip(documents)
        .collect();

    LoadedSnapshots {
        meta,
        base,
        supplements,
        report,
    }
}

fn decode_document(
    name: &str,
    result: Result<Vec<u8>, crate::backend::StoreError>,
    report: &mut LoadReport,
) -> SourceDocument {
    match result {
        Ok(bytes) => match serde_json::from_slice::<SourceDocument>(&bytes) {
            Ok(document) => document,
            Err(e) => {
                report.record(name, format!("parse failed: {e}"));
                SourceDocument::empty()
            }
        },
        Err(e) => {
            report.record(name, e.to_string());
            SourceDocument::empty()
        }
    }
}
