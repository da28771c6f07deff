// SPDX-License-Identifier: Apache-2.0

use fleetboard_engine::canonical::stable_json_hash_hex;
use fleetboard_engine::{derive_rows, merge, CoveragePolicy, DerivedRow, LinkBuilder};
use fleetboard_model::{DashboardMeta, DashboardSchema};
use fleetboard_store::{load_cycle, LoadReport, SnapshotBackend};
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;
use tracing::{error, info};

#[derive(Debug)]
pub struct SnapshotError(pub String);

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for SnapshotError {}

/// One completed load cycle's output. Fully rebuilt and swapped in as a
/// unit each refresh; handlers only ever read an immutable `Arc` of it.
#[derive(Debug)]
pub struct DashboardSnapshot {
    pub meta: DashboardMeta,
    pub rows: Vec<DerivedRow>,
    pub report: LoadReport,
    pub built_at: u64,
    pub content_hash: String,
}

/// Runs one full load-merge-derive cycle.
///
/// Source failures never surface here (the load cycle absorbs them); the
/// only error path is a construction-time shape defect in the documents
/// that did load.
pub async fn build_snapshot(
    backend: &dyn SnapshotBackend,
    schema: &DashboardSchema,
    policy: &CoveragePolicy,
    now: u64,
) -> Result<DashboardSnapshot, SnapshotError> {
    let loaded = load_cycle(backend, schema).await;
    let table = merge(schema, &loaded.base, &loaded.supplements)
        .map_err(|e| SnapshotError(e.to_string()))?;
    let content_hash =
        stable_json_hash_hex(&table).map_err(|e| SnapshotError(e.to_string()))?;
    let links = LinkBuilder::new(&loaded.meta.console_domain);
    let rows = derive_rows(schema, &table, &links, policy);
    Ok(DashboardSnapshot {
        meta: loaded.meta,
        rows,
        report: loaded.report,
        built_at: now,
        content_hash,
    })
}

struct StateInner {
    schema: DashboardSchema,
    policy: CoveragePolicy,
    snapshot: RwLock<Option<Arc<DashboardSnapshot>>>,
    ready: AtomicBool,
}

#[derive(Clone)]
pub struct AppState {
    inner: Arc<StateInner>,
}

impl AppState {
    #[must_use]
    pub fn new(schema: DashboardSchema, policy: CoveragePolicy) -> Self {
        Self {
            inner: Arc::new(StateInner {
                schema,
                policy,
                snapshot: RwLock::new(None),
                ready: AtomicBool::new(false),
            }),
        }
    }

    #[must_use]
    pub fn schema(&self) -> &DashboardSchema {
        &self.inner.schema
    }

    #[must_use]
    pub fn policy(&self) -> &CoveragePolicy {
        &self.inner.policy
    }

    pub async fn snapshot(&self) -> Option<Arc<DashboardSnapshot>> {
        self.inner.snapshot.read().await.clone()
    }

    /// Swaps the current snapshot; readers holding the previous `Arc`
    /// simply finish against the superseded cycle.
    pub async fn install_snapshot(&self, snapshot: DashboardSnapshot) {
        *self.inner.snapshot.write().await = Some(Arc::new(snapshot));
        self.inner.ready.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.inner.ready.load(Ordering::Relaxed)
    }
}

/// Periodic refresh: rebuild the snapshot each interval, keep the last
/// good one when a cycle fails. The first tick fires immediately, so
/// readiness flips as soon as the initial cycle completes.
pub fn spawn_refresh_task(
    state: AppState,
    backend: Arc<dyn SnapshotBackend>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match build_snapshot(
                backend.as_ref(),
                state.schema(),
                state.policy(),
                unix_now(),
            )
            .await
            {
                Ok(snapshot) => {
                    info!(
                        rows = snapshot.rows.len(),
                        degraded = snapshot.report.degraded.len(),
                        content_hash = %snapshot.content_hash,
                        "dashboard snapshot refreshed"
                    );
                    state.install_snapshot(snapshot).await;
                }
                Err(e) => error!("snapshot rebuild failed, keeping previous cycle: {e}"),
            }
        }
    })
}

#[must_use]
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
