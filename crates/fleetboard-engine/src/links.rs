// SPDX-License-Identifier: Apache-2.0

use fleetboard_model::{CompareRoute, ProjectId};

/// Builds the two console link families from the dashboard metadata's
/// console domain. The region is the domain's first dot-separated label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    repository_base: String,
    pipeline_base: String,
    region: String,
}

impl LinkBuilder {
    #[must_use]
    pub fn new(console_domain: &str) -> Self {
        Self {
            repository_base: format!("https://{console_domain}/codesuite/codecommit/repositories/"),
            pipeline_base: format!("https://{console_domain}/codesuite/codepipeline/pipelines/"),
            region: console_domain
                .split('.')
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[must_use]
    pub fn repository_browse(&self, project: &ProjectId) -> String {
        format!("{}{project}/browse", self.repository_base)
    }

    #[must_use]
    pub fn branch_browse(&self, project: &ProjectId, branch: &str) -> String {
        format!("{}{project}/browse/refs/heads/{branch}", self.repository_base)
    }

    #[must_use]
    pub fn pull_request(&self, project: &ProjectId, pull_request_id: &str) -> String {
        format!("{}{project}/pull-requests/{pull_request_id}", self.repository_base)
    }

    /// Pre-filled new-pull-request page for one delta counter's compare.
    #[must_use]
    pub fn open_pull_request(&self, project: &ProjectId, route: &CompareRoute) -> String {
        format!(
            "{}{project}/pull-requests/new/refs/heads/{}/.../refs/heads/{}?region={}",
            self.repository_base, route.base_ref, route.head_ref, self.region
        )
    }

    #[must_use]
    pub fn pipeline_view(&self, pipeline: &str) -> String {
        format!("{}{pipeline}/view", self.pipeline_base)
    }

    /// Conventional pipeline name for projects reporting one scalar status.
    #[must_use]
    pub fn default_pipeline_name(project: &ProjectId) -> String {
        format!("{project}-pipeline")
    }
}
