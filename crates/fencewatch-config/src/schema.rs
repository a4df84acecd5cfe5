//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Monitor cadence settings
    #[serde(default)]
    pub monitor: RawMonitor,

    /// Location data source
    pub source: RawSource,

    /// Mail delivery
    pub mail: RawMail,

    /// The tracked roster
    #[serde(default)]
    pub subjects: Vec<RawSubject>,
}

/// Monitor cadence
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawMonitor {
    /// Seconds between roster passes (default: 240)
    pub poll_interval_seconds: Option<u64>,

    /// Wall-clock duration of one run, in seconds (default: 3600)
    pub run_duration_seconds: Option<u64>,
}

/// Location data source settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawSource {
    /// Base URL of the status endpoint; the subject ID is appended per query
    pub base_url: String,

    /// Per-request timeout in seconds (default: 10)
    pub request_timeout_seconds: Option<u64>,

    /// Total query attempts per poll before finalizing an API error (default: 5)
    pub retry_attempts: Option<u32>,

    /// Seconds between query attempts (default: 5)
    pub retry_delay_seconds: Option<u64>,
}

/// Mail delivery settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawMail {
    /// SMTP relay host
    pub smtp_host: String,

    /// SMTPS port (default: 465)
    pub smtp_port: Option<u16>,

    /// Sender address for every alert
    pub sender: String,

    /// Alert recipients
    #[serde(default)]
    pub recipients: Vec<String>,
}

/// One tracked subject
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawSubject {
    /// Stable roster ID, as known to the location API
    pub id: String,

    /// Display label for logs
    pub label: Option<String>,
}
