//! Subject status, poll classification, and the transition table

use serde::{Deserialize, Serialize};
use std::fmt;

/// The one status held per tracked subject.
///
/// Every roster subject has exactly one status at all times; subjects start
/// `Safe`. A failed poll never changes status — the error condition lives in
/// [`Classification`], not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Safe,
    Lost,
    Critical,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Safe => "safe",
            Status::Lost => "lost",
            Status::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of one poll attempt for one subject. Derived fresh each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Inside (or touching) at least one boundary region
    Safe,
    /// Outside every boundary region
    Unsafe,
    /// The data source could not produce a usable answer this tick
    ApiError,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Classification::Safe => "safe",
            Classification::Unsafe => "unsafe",
            Classification::ApiError => "api-error",
        };
        write!(f, "{}", s)
    }
}

/// The four templated notification types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    ApiError,
    Lost,
    Critical,
    Safe,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlertKind::ApiError => "api-error",
            AlertKind::Lost => "lost",
            AlertKind::Critical => "critical",
            AlertKind::Safe => "safe",
        };
        write!(f, "{}", s)
    }
}

/// Advance one subject's status by one poll classification.
///
/// Alerts fire only on status change for the Lost/Critical/Safe family, so
/// a subject parked in `Critical` stays quiet until something changes.
/// `ApiError` alerts on every occurrence and leaves the status untouched.
pub fn advance(prev: Status, classification: Classification) -> (Status, Option<AlertKind>) {
    match classification {
        Classification::ApiError => (prev, Some(AlertKind::ApiError)),
        Classification::Unsafe => match prev {
            Status::Safe => (Status::Lost, Some(AlertKind::Lost)),
            Status::Lost => (Status::Critical, Some(AlertKind::Critical)),
            Status::Critical => (Status::Critical, None),
        },
        Classification::Safe => match prev {
            Status::Safe => (Status::Safe, None),
            Status::Lost | Status::Critical => (Status::Safe, Some(AlertKind::Safe)),
        },
    }
}
