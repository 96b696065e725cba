//! HTTPS client for the activation and measurement APIs.
//!
//! Every call is a single attempt. Responses are owned by the loop iteration or
//! function that obtained them, so their bodies are released on every exit path.

use reqwest::Client;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::Snapshot;

/// One failed activation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFailure {
    /// Zero-based position in the batch
    pub call: usize,
    pub message: String,
}

/// Outcome of a fully successful activation batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationReport {
    pub attempted: usize,
    /// Calls that completed at the transport level but answered with a non-2xx status
    pub non_success_status: usize,
}

/// At least one call in the batch failed. The whole batch was still attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationError {
    pub attempted: usize,
    pub failures: Vec<CallFailure>,
}

impl ActivationError {
    /// The failure that gets reported: the last one in the batch
    pub fn last_message(&self) -> &str {
        self.failures
            .last()
            .map(|f| f.message.as_str())
            .unwrap_or_default()
    }
}

impl fmt::Display for ActivationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error in calling activate API: {}", self.last_message())
    }
}

impl std::error::Error for ActivationError {}

#[derive(Debug, Error)]
pub enum MeasurementError {
    #[error("Error in calling measure API: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Error in reading measure results: {0}")]
    Read(#[source] reqwest::Error),

    #[error("Error in decoding measure results: {0}")]
    Decode(#[source] serde_json::Error),
}

impl MeasurementError {
    pub fn stage(&self) -> &'static str {
        match self {
            MeasurementError::Transport(_) => "calling measure API",
            MeasurementError::Read(_) => "reading measure results",
            MeasurementError::Decode(_) => "decoding measure results",
        }
    }
}

#[derive(Clone)]
pub struct SensorClient {
    http: Client,
}

impl SensorClient {
    /// Build a client with rustls and certificate verification left on.
    /// `timeout` bounds each call from connect to end of body.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }

    /// Issue `batch` sequential GETs against the activation endpoint.
    pub async fn activate(
        &self,
        url: &str,
        batch: usize,
    ) -> Result<ActivationReport, ActivationError> {
        let mut failures = Vec::new();
        let mut non_success_status = 0;

        for call in 0..batch {
            match self.http.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if !status.is_success() {
                        non_success_status += 1;
                        debug!(call, %status, "activate API answered with non-success status");
                    }
                    // response dropped here, releasing the connection
                }
                Err(e) => {
                    warn!(call, batch, url, err = %e, "activate API call failed");
                    failures.push(CallFailure {
                        call,
                        message: e.to_string(),
                    });
                }
            }
        }

        if failures.is_empty() {
            info!(batch, non_success_status, "sensors activated");
            Ok(ActivationReport {
                attempted: batch,
                non_success_status,
            })
        } else {
            Err(ActivationError {
                attempted: batch,
                failures,
            })
        }
    }

    /// Fetch the latest readings and decode them into a snapshot.
    pub async fn measure(&self, url: &str) -> Result<Snapshot, MeasurementError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(MeasurementError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, %status, "measure API answered with non-success status");
        }

        let body = response.bytes().await.map_err(MeasurementError::Read)?;
        let snapshot = Snapshot::from_json(&body).map_err(MeasurementError::Decode)?;

        debug!(sensors = snapshot.len(), bytes = body.len(), "measure results decoded");
        Ok(snapshot)
    }
}
