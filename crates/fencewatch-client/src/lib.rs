//! Location API client for fencewatch
//!
//! One [`LocationSource::fetch_status`] call answers "where does this subject
//! stand right now" as a [`Classification`]. Transient trouble — an error
//! payload from the API or a failed request — is retried a bounded number of
//! times and then reported as `Classification::ApiError`, never as an `Err`.
//! Only a malformed payload is an `Err`: that is a data defect, not weather.

mod http;
mod mock;

pub use http::*;
pub use mock::*;

use async_trait::async_trait;
use fencewatch_core::Classification;
use fencewatch_geo::GeoError;
use fencewatch_util::SubjectId;
use thiserror::Error;

/// Errors from location source operations
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Malformed status payload for subject {subject}: {source}")]
    MalformedPayload {
        subject: SubjectId,
        #[source]
        source: GeoError,
    },
}

/// A source of per-subject status classifications
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Poll the source once for one subject and classify the outcome.
    async fn fetch_status(&self, subject: &SubjectId) -> Result<Classification, SourceError>;
}
