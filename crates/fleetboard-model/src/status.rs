// SPDX-License-Identifier: Apache-2.0

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Mapping from pipeline sub-name to its reported status.
pub type PipelineStatusSet = BTreeMap<String, PipelineStatus>;

/// Per-pipeline status as reported by the upstream snapshot.
///
/// The wire forms are the upstream literals; anything unrecognized
/// normalizes to [`PipelineStatus::NotAvailable`] so that historical
/// misspellings in a feed can never widen the closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PipelineStatus {
    Succeeded,
    Failed,
    InProgress,
    NotAvailable,
}

impl PipelineStatus {
    #[must_use]
    pub fn parse(input: &str) -> Self {
        match input {
            "Succeeded" => Self::Succeeded,
            "Failed" => Self::Failed,
            "InProgress" => Self::InProgress,
            _ => Self::NotAvailable,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::InProgress => "InProgress",
            Self::NotAvailable => "N/A",
        }
    }
}

impl Display for PipelineStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for PipelineStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PipelineStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Aggregate health computed from a [`PipelineStatusSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollupStatus {
    Succeeded,
    Failed,
    InProgress,
    Neutral,
}

impl RollupStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::InProgress => "in_progress",
            Self::Neutral => "neutral",
        }
    }
}

impl Display for RollupStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
