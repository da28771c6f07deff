use fleetboard_model::{FieldId, ProjectId};
use std::collections::BTreeSet;

/// Which list-valued cells are currently showing their expanded view.
///
/// Keyed by `(project, field)`, owned by the rendering layer; every cell
/// starts collapsed and toggles independently of every other row.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExpandState {
    expanded: BTreeSet<(ProjectId, FieldId)>,
}

impl ExpandState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_expanded(&self, project: &ProjectId, field: &FieldId) -> bool {
        self.expanded
            .contains(&(project.clone(), field.clone()))
    }

    /// Flips one cell's view and returns the new state.
    pub fn toggle(&mut self, project: &ProjectId, field: &FieldId) -> bool {
        let key = (project.clone(), field.clone());
        if self.expanded.remove(&key) {
            false
        } else {
            self.expanded.insert(key);
            true
        }
    }

    pub fn set(&mut self, project: &ProjectId, field: &FieldId, expanded: bool) {
        let key = (project.clone(), field.clone());
        if expanded {
            self.expanded.insert(key);
        } else {
            self.expanded.remove(&key);
        }
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(p: &str, f: &str) -> (ProjectId, FieldId) {
        (
            ProjectId::parse(p).expect("project"),
            FieldId::parse(f).expect("field"),
        )
    }

    #[test]
    fn cells_default_collapsed_and_toggle_independently() {
        let mut state = ExpandState::new();
        let (alpha, prs) = key("svc-alpha", "pull_requests");
        let (beta, _) = key("svc-beta", "pull_requests");

        assert!(!state.is_expanded(&alpha, &prs));
        assert!(state.toggle(&alpha, &prs));
        assert!(state.is_expanded(&alpha, &prs));
        assert!(!state.is_expanded(&beta, &prs), "rows stay independent");
        assert!(!state.toggle(&alpha, &prs));
        assert!(!state.is_expanded(&alpha, &prs));
    }

    #[test]
    fn collapse_all_resets_every_cell() {
        let mut state = ExpandState::new();
        let (alpha, prs) = key("svc-alpha", "pull_requests");
        let (alpha2, pipelines) = key("svc-alpha", "pipeline_status");
        state.set(&alpha, &prs, true);
        state.set(&alpha2, &pipelines, true);
        state.collapse_all();
        assert!(!state.is_expanded(&alpha, &prs));
        assert!(!state.is_expanded(&alpha2, &pipelines));
    }
}
