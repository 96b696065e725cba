//! activate → measure → evaluate → report, one request at a time.
//!
//! Each stage runs strictly after the previous one and any failure ends the pass.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, DecodePolicy, MoodSettings, SettingsSource};
use crate::report::MoodReport;
use crate::sensors::{ActivationError, MeasurementError, SensorClient, Snapshot, SnapshotStore};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Activation(#[from] ActivationError),

    #[error(transparent)]
    Measurement(#[from] MeasurementError),
}

impl PipelineError {
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Config(_) => "configuration",
            PipelineError::Activation(_) => "activation",
            PipelineError::Measurement(_) => "measurement",
        }
    }

    /// Failure came from one of the sensor APIs rather than from local settings
    pub fn is_upstream(&self) -> bool {
        !matches!(self, PipelineError::Config(_))
    }
}

#[derive(Clone)]
pub struct MoodPipeline {
    client: SensorClient,
    store: Arc<SnapshotStore>,
}

impl MoodPipeline {
    pub fn new(client: SensorClient, store: Arc<SnapshotStore>) -> Self {
        Self { client, store }
    }

    pub fn store(&self) -> &Arc<SnapshotStore> {
        &self.store
    }

    /// Load settings from `source` and run one pass.
    /// A bad setting aborts before any upstream call is made.
    pub async fn run(&self, source: &dyn SettingsSource) -> Result<MoodReport, PipelineError> {
        let settings = MoodSettings::load(source)?;
        self.run_with(&settings).await
    }

    pub async fn run_with(&self, settings: &MoodSettings) -> Result<MoodReport, PipelineError> {
        let activation = self
            .client
            .activate(&settings.activate_url, settings.activation_batch)
            .await
            .map_err(|e| {
                warn!(
                    attempted = e.attempted,
                    failed = e.failures.len(),
                    last_error = %e.last_message(),
                    "sensor activation failed"
                );
                e
            })?;

        let snapshot = self.refresh_snapshot(settings).await?;

        let report = MoodReport::assemble(&snapshot, settings.happy_threshold, activation.attempted);
        info!(
            mood = %report.mood,
            happy_percent = %report.happy_percent,
            threshold = settings.happy_threshold,
            sensors = report.total_sensors,
            "mood evaluated"
        );
        Ok(report)
    }

    /// Fetch measurements and swap them into the store.
    /// The store is only written when a full sensor list decoded.
    async fn refresh_snapshot(
        &self,
        settings: &MoodSettings,
    ) -> Result<Arc<Snapshot>, PipelineError> {
        match self.client.measure(&settings.measure_url).await {
            Ok(fresh) => {
                let stored = self.store.replace(fresh);
                debug!(
                    sensors = stored.len(),
                    generation = self.store.generation(),
                    "snapshot replaced"
                );
                Ok(stored)
            }
            Err(MeasurementError::Decode(e))
                if settings.decode_policy == DecodePolicy::BestEffort =>
            {
                let kept = self.store.current();
                warn!(
                    err = %e,
                    policy = %settings.decode_policy,
                    kept_sensors = kept.len(),
                    "measure results did not decode; keeping previous snapshot"
                );
                Ok(kept)
            }
            Err(e) => {
                warn!(stage = e.stage(), err = %e, "sensor measurement failed");
                Err(e.into())
            }
        }
    }
}
