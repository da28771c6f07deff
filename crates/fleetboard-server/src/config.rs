use fleetboard_store::RetryPolicy;
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Where the five snapshot documents come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum BackendSpec {
    Local { root: PathBuf },
    Http { base_url: String },
}

impl BackendSpec {
    /// Accepts `local:<dir>`, `http:<base-url>`, or a bare directory path.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("snapshot source must not be empty".to_string());
        }
        if let Some(path) = trimmed.strip_prefix("local:") {
            return Ok(Self::Local {
                root: PathBuf::from(path),
            });
        }
        if let Some(url) = trimmed.strip_prefix("http:") {
            return Ok(Self::Http {
                base_url: url.to_string(),
            });
        }
        Ok(Self::Local {
            root: PathBuf::from(trimmed),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub backend: BackendSpec,
    pub refresh_interval: Duration,
    pub fetch_timeout: Duration,
    pub coverage_healthy_min: f64,
    pub readiness_requires_snapshot: bool,
    pub log_json: bool,
    pub retry_attempts: usize,
    pub retry_base_backoff_ms: u64,
    pub shutdown_drain: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            backend: BackendSpec::Local {
                root: PathBuf::from("data"),
            },
            refresh_interval: Duration::from_secs(300),
            fetch_timeout: Duration::from_secs(3),
            coverage_healthy_min: 75.0,
            readiness_requires_snapshot: true,
            log_json: true,
            retry_attempts: 3,
            retry_base_backoff_ms: 120,
            shutdown_drain: Duration::from_millis(2000),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();
        let backend = BackendSpec::parse(
            &env::var("FLEETBOARD_SNAPSHOT_SOURCE").unwrap_or_else(|_| "local:data".to_string()),
        )?;
        Ok(Self {
            bind_addr: env::var("FLEETBOARD_BIND").unwrap_or(defaults.bind_addr),
            backend,
            refresh_interval: Duration::from_secs(env_u64(
                "FLEETBOARD_REFRESH_INTERVAL_SECS",
                300,
            )),
            fetch_timeout: env_duration_ms("FLEETBOARD_FETCH_TIMEOUT_MS", 3000),
            coverage_healthy_min: env_f64("FLEETBOARD_COVERAGE_HEALTHY_MIN", 75.0),
            readiness_requires_snapshot: env_bool("FLEETBOARD_READINESS_REQUIRES_SNAPSHOT", true),
            log_json: env_bool("FLEETBOARD_LOG_JSON", true),
            retry_attempts: env_usize("FLEETBOARD_FETCH_RETRY_ATTEMPTS", 3),
            retry_base_backoff_ms: env_u64("FLEETBOARD_FETCH_RETRY_BASE_MS", 120),
            shutdown_drain: env_duration_ms("FLEETBOARD_SHUTDOWN_DRAIN_MS", 2000),
        })
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_attempts,
            base_backoff_ms: self.retry_base_backoff_ms,
        }
    }
}

pub fn validate_startup_config(config: &ServerConfig) -> Result<(), String> {
    if config.refresh_interval.is_zero() {
        return Err("refresh interval must be > 0".to_string());
    }
    if config.fetch_timeout.is_zero() {
        return Err("fetch timeout must be > 0".to_string());
    }
    if !(0.0..=100.0).contains(&config.coverage_healthy_min) {
        return Err("coverage threshold must be within 0..=100".to_string());
    }
    if config.retry_attempts == 0 {
        return Err("retry attempts must be > 0".to_string());
    }
    Ok(())
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_f64(name: &str, default: f64) -> f64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(default)
}

fn env_duration_ms(name: &str, default_ms: u64) -> Duration {
    Duration::from_millis(env_u64(name, default_ms))
}
