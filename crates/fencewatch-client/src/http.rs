//! HTTP implementation of the location source

use async_trait::async_trait;
use fencewatch_core::Classification;
use fencewatch_geo::{Payload, decode_payload, is_inside};
use fencewatch_util::SubjectId;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{LocationSource, SourceError};

/// Configuration for the HTTP location client
#[derive(Debug, Clone)]
pub struct LocationApiConfig {
    /// Base URL of the status endpoint; the subject ID is appended per query
    pub base_url: String,
    /// Timeout for each individual request
    pub request_timeout: Duration,
    /// Total query attempts per poll before finalizing an API error
    pub retry_attempts: u32,
    /// Delay between query attempts
    pub retry_delay: Duration,
}

/// Location source backed by the remote status API
pub struct HttpLocationClient {
    client: Client,
    config: LocationApiConfig,
}

impl HttpLocationClient {
    pub fn new(config: LocationApiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.request_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    async fn query(&self, url: &str) -> Result<serde_json::Value, reqwest::Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        response.json().await
    }
}

#[async_trait]
impl LocationSource for HttpLocationClient {
    async fn fetch_status(&self, subject: &SubjectId) -> Result<Classification, SourceError> {
        let url = format!("{}/{}", self.config.base_url, subject);

        for attempt in 1..=self.config.retry_attempts {
            match self.query(&url).await {
                Ok(value) => match decode_payload(value) {
                    Ok(Payload::Tracked(location)) => {
                        let inside = is_inside(&location.position, &location.boundaries);
                        debug!(
                            subject = %subject,
                            attempt,
                            boundaries = location.boundaries.len(),
                            inside,
                            "Location classified"
                        );
                        return Ok(if inside {
                            Classification::Safe
                        } else {
                            Classification::Unsafe
                        });
                    }
                    Ok(Payload::Error(detail)) => {
                        warn!(
                            subject = %subject,
                            attempt,
                            max_attempts = self.config.retry_attempts,
                            detail = %detail,
                            "Location API reported an error"
                        );
                    }
                    Err(e) => {
                        return Err(SourceError::MalformedPayload {
                            subject: subject.clone(),
                            source: e,
                        });
                    }
                },
                // Request-level failures take the same retry path as API
                // error payloads and finalize as an ApiError classification.
                Err(e) => {
                    warn!(
                        subject = %subject,
                        attempt,
                        max_attempts = self.config.retry_attempts,
                        error = %e,
                        "Location query failed"
                    );
                }
            }

            if attempt < self.config.retry_attempts {
                tokio::time::sleep(self.config.retry_delay).await;
            }
        }

        Ok(Classification::ApiError)
    }
}
