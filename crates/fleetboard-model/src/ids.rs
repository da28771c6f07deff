// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

pub const PROJECT_ID_MAX_LEN: usize = 128;
pub const SOURCE_NAME_MAX_LEN: usize = 64;

pub fn parse_project_id(input: &str) -> Result<ProjectId, ValidationError> {
    ProjectId::parse(input)
}

pub fn parse_source_name(input: &str) -> Result<SourceName, ValidationError> {
    SourceName::parse(input)
}

pub fn parse_field_id(input: &str) -> Result<FieldId, ValidationError> {
    FieldId::parse(input)
}

/// Join key across all snapshot documents: one repository/project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct ProjectId(String);

impl ProjectId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input != input.trim() {
            return Err(ValidationError(
                "project id must not carry surrounding whitespace".to_string(),
            ));
        }
        if input.is_empty() {
            return Err(ValidationError("project id must not be empty".to_string()));
        }
        if input.len() > PROJECT_ID_MAX_LEN {
            return Err(ValidationError(format!(
                "project id exceeds max length {PROJECT_ID_MAX_LEN}"
            )));
        }
        if !input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-')
        {
            return Err(ValidationError(
                "project id must match [A-Za-z0-9._-]+".to_string(),
            ));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ProjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of one snapshot source in the declared schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct SourceName(String);

impl SourceName {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        validate_snake_case("source name", input)?;
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for SourceName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Column identifier within the declared schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct FieldId(String);

impl FieldId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        validate_snake_case("field id", input)?;
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for FieldId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn validate_snake_case(what: &str, input: &str) -> Result<(), ValidationError> {
    if input.is_empty() {
        return Err(ValidationError(format!("{what} must not be empty")));
    }
    if input.len() > SOURCE_NAME_MAX_LEN {
        return Err(ValidationError(format!(
            "{what} exceeds max length {SOURCE_NAME_MAX_LEN}"
        )));
    }
    if !input
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(ValidationError(format!(
            "{what} must match [a-z0-9_]+ in snake_case"
        )));
    }
    if input.starts_with('_') || input.ends_with('_') || input.contains("__") {
        return Err(ValidationError(format!(
            "{what} must not start/end with '_' or contain '__'"
        )));
    }
    Ok(())
}
