//! Report assembly: classification plus the per-sensor table.

pub mod html;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mood::{compute_happy_percent, happy_count, HappyPercent, Mood};
use crate::sensors::{SensorRecord, Snapshot};

/// One table row per sensor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorRow {
    pub id: i64,
    pub role: String,
    pub mood: String,
    pub legacy: String,
    pub pre_existing: bool,
}

impl From<&SensorRecord> for SensorRow {
    fn from(s: &SensorRecord) -> Self {
        Self {
            id: s.id,
            role: s.role.clone(),
            mood: s.mood.clone(),
            legacy: s.legacy.clone(),
            pre_existing: s.is_pre_existing(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodReport {
    pub mood: Mood,
    pub happy_percent: HappyPercent,
    pub happy_threshold: i64,
    pub happy_sensors: usize,
    pub total_sensors: usize,
    /// Activation calls made before measuring
    pub activated_calls: usize,
    pub rows: Vec<SensorRow>,
    pub generated_at: DateTime<Utc>,
}

impl MoodReport {
    /// Evaluate `snapshot` against `threshold` and tabulate it
    pub fn assemble(snapshot: &Snapshot, threshold: i64, activated_calls: usize) -> Self {
        let happy_percent = compute_happy_percent(snapshot);
        Self {
            mood: Mood::classify(happy_percent, threshold),
            happy_percent,
            happy_threshold: threshold,
            happy_sensors: happy_count(snapshot),
            total_sensors: snapshot.len(),
            activated_calls,
            rows: snapshot.iter().map(SensorRow::from).collect(),
            generated_at: Utc::now(),
        }
    }
}
