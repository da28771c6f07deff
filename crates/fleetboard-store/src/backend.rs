// SPDX-License-Identifier: Apache-2.0

use crate::retry::{BackoffPolicy, RetryPolicy};
use async_trait::async_trait;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorCode {
    NotFound,
    Network,
    Io,
    Malformed,
    Internal,
}

impl StoreErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Network => "network_error",
            Self::Io => "io_error",
            Self::Malformed => "malformed_document",
            Self::Internal => "internal_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for StoreError {}

/// One place the five snapshot documents can be fetched from.
///
/// `name` is the bare document name (`dashboard-meta`, `repositories`,
/// ...); backends append the `.json` suffix themselves.
#[async_trait]
pub trait SnapshotBackend: Send + Sync {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, StoreError>;
    fn describe(&self) -> String;
}

/// Snapshot directory on local disk: `<root>/<name>.json`.
pub struct LocalFsBackend {
    root: PathBuf,
}

impl LocalFsBackend {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl SnapshotBackend for LocalFsBackend {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.root.join(format!("{name}.json"));
        tokio::fs::read(&path).await.map_err(|e| {
            let code = if e.kind() == std::io::ErrorKind::NotFound {
                StoreErrorCode::NotFound
            } else {
                StoreErrorCode::Io
            };
            StoreError::new(code, format!("{}: {e}", path.display()))
        })
    }

    fn describe(&self) -> String {
        format!("local:{}", self.root.display())
    }
}

/// Snapshot documents served over HTTP: `<base>/<name>.json`.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl HttpBackend {
    pub fn new(
        base_url: String,
        request_timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| StoreError::new(StoreErrorCode::Internal, e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            retry,
        })
    }

    fn document_url(&self, name: &str) -> String {
        format!("{}/{name}.json", self.base_url)
    }
}

#[async_trait]
impl SnapshotBackend for HttpBackend {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        let url = self.document_url(name);
        let mut last_error =
            StoreError::new(StoreErrorCode::Internal, "no fetch attempt made");
        for attempt in 0..self.retry.max_attempts.max(1) {
            if attempt > 0 {
                tokio::time::sleep(self.retry.delay_for_attempt(attempt)).await;
            }
            match self.client.get(&url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status == reqwest::StatusCode::NOT_FOUND {
                        // A missing document will not appear on retry.
                        return Err(StoreError::new(
                            StoreErrorCode::NotFound,
                            format!("{url}: 404"),
                        ));
                    }
                    if status.is_success() {
                        return response
                            .bytes()
                            .await
                            .map(|b| b.to_vec())
                            .map_err(|e| {
                                StoreError::new(StoreErrorCode::Network, e.to_string())
                            });
                    }
                    last_error = StoreError::new(
                        StoreErrorCode::Network,
                        format!("{url}: status {status}"),
                    );
                }
                Err(e) => {
                    last_error = StoreError::new(StoreErrorCode::Network, e.to_string());
                }
            }
        }
        Err(last_error)
    }

    fn describe(&self) -> String {
        format!("http:{}", self.base_url)
    }
}
