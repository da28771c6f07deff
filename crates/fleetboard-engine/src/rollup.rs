// SPDX-License-Identifier: Apache-2.0

use fleetboard_model::{PipelineStatus, PipelineStatusSet, RollupStatus};

/// Collapses a set of per-pipeline statuses into one health category.
///
/// Precedence, first match wins:
/// 1. non-empty and unanimously `Succeeded` -> `Succeeded`
/// 2. any `Failed` -> `Failed`
/// 3. any `InProgress` -> `InProgress`
/// 4. otherwise -> `Neutral`
///
/// `Failed` ranks above `InProgress`: a failing pipeline must never be
/// masked by siblings that are still running.
#[must_use]
pub fn roll_up(statuses: &PipelineStatusSet) -> RollupStatus {
    if !statuses.is_empty()
        && statuses
            .values()
            .all(|s| *s == PipelineStatus::Succeeded)
    {
        return RollupStatus::Succeeded;
    }
    if statuses.values().any(|s| *s == PipelineStatus::Failed) {
        return RollupStatus::Failed;
    }
    if statuses.values().any(|s| *s == PipelineStatus::InProgress) {
        return RollupStatus::InProgress;
    }
    RollupStatus::Neutral
}
