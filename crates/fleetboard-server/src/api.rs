// SPDX-License-Identifier: Apache-2.0

use fleetboard_engine::DerivedRow;
use fleetboard_model::{DashboardSchema, FieldKind};
use fleetboard_store::DegradedSource;
use serde::Serialize;

pub const API_VERSION: &str = "1";

/// Column definition the tabular view renders headers from, in merged
/// field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDto {
    pub id: String,
    pub title: String,
    pub kind: FieldKind,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

#[must_use]
pub fn columns_from_schema(schema: &DashboardSchema) -> Vec<ColumnDto> {
    let mut columns = Vec::with_capacity(schema.total_arity());
    let sources =
        std::iter::once(schema.base()).chain(schema.supplements().iter());
    for source in sources {
        for field in source.fields() {
            columns.push(ColumnDto {
                id: field.id.as_str().to_string(),
                title: field.title.clone(),
                kind: field.kind,
                source: source.name().as_str().to_string(),
                group: field.group.clone(),
            });
        }
    }
    columns
}

#[derive(Debug, Clone, Serialize)]
pub struct MetaResponseDto {
    pub api_version: String,
    pub last_updated: u64,
    pub console_domain: String,
    pub freshness: String,
    pub banner: String,
    pub degraded_sources: Vec<DegradedSource>,
    pub content_hash: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponseDto {
    pub api_version: String,
    pub freshness: String,
    pub columns: Vec<ColumnDto>,
    pub rows: Vec<DerivedRow>,
    pub degraded_sources: Vec<DegradedSource>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectResponseDto {
    pub api_version: String,
    pub freshness: String,
    pub row: DerivedRow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ApiErrorCode {
    NotReady,
    InvalidProjectId,
    ProjectNotFound,
    Internal,
}

impl ApiErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotReady => "not_ready",
            Self::InvalidProjectId => "invalid_project_id",
            Self::ProjectNotFound => "project_not_found",
            Self::Internal => "internal_error",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}
