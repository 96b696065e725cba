// ---- Clippy/lints: keep signals high, noise low ----
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// Library crate entry to allow integration tests to drive the pipeline and router
pub mod api;
pub mod config;
pub mod mood;
pub mod pipeline;
pub mod report;
pub mod sensors;

pub use config::{ConfigError, DecodePolicy, MoodSettings, SettingsSource};
pub use mood::{HappyPercent, Mood};
pub use pipeline::{MoodPipeline, PipelineError};
pub use report::MoodReport;
pub use sensors::{SensorClient, SensorRecord, Snapshot, SnapshotStore};
