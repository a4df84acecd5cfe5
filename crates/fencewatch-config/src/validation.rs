//! Configuration validation

use crate::schema::RawConfig;
use std::collections::HashSet;
use thiserror::Error;
use url::Url;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Roster is empty: at least one [[subjects]] entry is required")]
    EmptyRoster,

    #[error("Subject ID must not be empty")]
    EmptySubjectId,

    #[error("Duplicate subject ID: {0}")]
    DuplicateSubjectId(String),

    #[error("Invalid source base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("Mail sender address must not be empty")]
    EmptySender,

    #[error("At least one mail recipient is required")]
    NoRecipients,

    #[error("SMTP host must not be empty")]
    EmptySmtpHost,

    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },
}

/// Validate a raw configuration, collecting every problem found
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Roster
    if config.subjects.is_empty() {
        errors.push(ValidationError::EmptyRoster);
    }
    let mut seen_ids = HashSet::new();
    for subject in &config.subjects {
        if subject.id.is_empty() {
            errors.push(ValidationError::EmptySubjectId);
        } else if !seen_ids.insert(&subject.id) {
            errors.push(ValidationError::DuplicateSubjectId(subject.id.clone()));
        }
    }

    // Source
    match Url::parse(&config.source.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::InvalidBaseUrl {
            url: config.source.base_url.clone(),
            message: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidBaseUrl {
            url: config.source.base_url.clone(),
            message: e.to_string(),
        }),
    }
    if config.source.retry_attempts == Some(0) {
        errors.push(ValidationError::ZeroValue { field: "source.retry_attempts" });
    }
    if config.source.request_timeout_seconds == Some(0) {
        errors.push(ValidationError::ZeroValue { field: "source.request_timeout_seconds" });
    }

    // Monitor cadence
    if config.monitor.poll_interval_seconds == Some(0) {
        errors.push(ValidationError::ZeroValue { field: "monitor.poll_interval_seconds" });
    }
    if config.monitor.run_duration_seconds == Some(0) {
        errors.push(ValidationError::ZeroValue { field: "monitor.run_duration_seconds" });
    }

    // Mail
    if config.mail.smtp_host.is_empty() {
        errors.push(ValidationError::EmptySmtpHost);
    }
    if config.mail.sender.is_empty() {
        errors.push(ValidationError::EmptySender);
    }
    if config.mail.recipients.is_empty() {
        errors.push(ValidationError::NoRecipients);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{RawMail, RawMonitor, RawSource, RawSubject};

    fn valid_config() -> RawConfig {
        RawConfig {
            config_version: 1,
            monitor: RawMonitor::default(),
            source: RawSource {
                base_url: "https://api.example.com/status".into(),
                request_timeout_seconds: None,
                retry_attempts: None,
                retry_delay_seconds: None,
            },
            mail: RawMail {
                smtp_host: "smtp.example.com".into(),
                smtp_port: None,
                sender: "watchdog@example.com".into(),
                recipients: vec!["ops@example.com".into()],
            },
            subjects: vec![RawSubject { id: "1".into(), label: None }],
        }
    }

    #[test]
    fn valid_config_has_no_errors() {
        assert!(validate_config(&valid_config()).is_empty());
    }

    #[test]
    fn duplicate_subject_ids_are_rejected() {
        let mut config = valid_config();
        config.subjects.push(RawSubject { id: "1".into(), label: None });

        let errors = validate_config(&config);
        assert!(
            errors
                .iter()
                .any(|e| matches!(e, ValidationError::DuplicateSubjectId(id) if id == "1"))
        );
    }

    #[test]
    fn empty_roster_is_rejected() {
        let mut config = valid_config();
        config.subjects.clear();

        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::EmptyRoster)));
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let mut config = valid_config();
        config.source.base_url = "ftp://api.example.com".into();

        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn zero_cadence_values_are_rejected() {
        let mut config = valid_config();
        config.monitor.poll_interval_seconds = Some(0);
        config.source.retry_attempts = Some(0);

        let errors = validate_config(&config);
        assert_eq!(
            errors
                .iter()
                .filter(|e| matches!(e, ValidationError::ZeroValue { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn missing_recipients_are_rejected() {
        let mut config = valid_config();
        config.mail.recipients.clear();

        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::NoRecipients)));
    }
}
