//! Validated runtime settings (converted from the raw schema)

use fencewatch_util::SubjectId;
use std::time::Duration;

use crate::schema::RawConfig;

/// Default seconds between roster passes
pub const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 240;
/// Default wall-clock duration of one run
pub const DEFAULT_RUN_DURATION_SECONDS: u64 = 3600;
/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;
/// Default total query attempts per poll
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 5;
/// Default seconds between query attempts
pub const DEFAULT_RETRY_DELAY_SECONDS: u64 = 5;
/// Default SMTPS port
pub const DEFAULT_SMTP_PORT: u16 = 465;

/// Validated configuration, immutable for the run's lifetime
#[derive(Debug, Clone)]
pub struct Settings {
    pub monitor: MonitorSettings,
    pub source: SourceSettings,
    pub mail: MailSettings,
    /// Roster in configured order; polls happen in this order every tick
    pub roster: Vec<Subject>,
}

#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub poll_interval: Duration,
    pub run_duration: Duration,
}

#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub base_url: String,
    pub request_timeout: Duration,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct MailSettings {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub sender: String,
    pub recipients: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Subject {
    pub id: SubjectId,
    pub label: Option<String>,
}

impl Settings {
    /// Convert a validated raw config, applying defaults
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            monitor: MonitorSettings {
                poll_interval: Duration::from_secs(
                    raw.monitor
                        .poll_interval_seconds
                        .unwrap_or(DEFAULT_POLL_INTERVAL_SECONDS),
                ),
                run_duration: Duration::from_secs(
                    raw.monitor
                        .run_duration_seconds
                        .unwrap_or(DEFAULT_RUN_DURATION_SECONDS),
                ),
            },
            source: SourceSettings {
                base_url: raw.source.base_url.trim_end_matches('/').to_string(),
                request_timeout: Duration::from_secs(
                    raw.source
                        .request_timeout_seconds
                        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS),
                ),
                retry_attempts: raw.source.retry_attempts.unwrap_or(DEFAULT_RETRY_ATTEMPTS),
                retry_delay: Duration::from_secs(
                    raw.source
                        .retry_delay_seconds
                        .unwrap_or(DEFAULT_RETRY_DELAY_SECONDS),
                ),
            },
            mail: MailSettings {
                smtp_host: raw.mail.smtp_host,
                smtp_port: raw.mail.smtp_port.unwrap_or(DEFAULT_SMTP_PORT),
                sender: raw.mail.sender,
                recipients: raw.mail.recipients,
            },
            roster: raw
                .subjects
                .into_iter()
                .map(|s| Subject {
                    id: SubjectId::new(s.id),
                    label: s.label,
                })
                .collect(),
        }
    }

    /// Roster IDs in configured order
    pub fn roster_ids(&self) -> Vec<SubjectId> {
        self.roster.iter().map(|s| s.id.clone()).collect()
    }
}
