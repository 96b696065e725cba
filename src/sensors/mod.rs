//! Sensor records as reported by the measurement API, and the snapshot they form.

pub mod client;
pub mod store;

pub use client::{ActivationError, ActivationReport, CallFailure, MeasurementError, SensorClient};
pub use store::{SnapshotStore, StoredSnapshot};

use serde::{Deserialize, Serialize};

/// Mood tag that counts towards happiness
pub const HAPPY_MOOD: &str = "happy";

/// Legacy marker for a sensor that is not pre-existing
pub const LEGACY_NONE: &str = "none";

/// One reporting unit, exactly as the measurement API returns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorRecord {
    pub id: i64,
    pub role: String,
    pub mood: String,
    pub legacy: String,
}

impl SensorRecord {
    pub fn is_happy(&self) -> bool {
        self.mood == HAPPY_MOOD
    }

    /// Anything other than the literal `none` marks the sensor as pre-existing
    pub fn is_pre_existing(&self) -> bool {
        self.legacy != LEGACY_NONE
    }

    /// Happy and not pre-existing
    pub fn counts_as_happy(&self) -> bool {
        self.is_happy() && !self.is_pre_existing()
    }
}

/// Full sensor set from a single measurement fetch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    sensors: Vec<SensorRecord>,
}

impl Snapshot {
    pub fn new(sensors: Vec<SensorRecord>) -> Self {
        Self { sensors }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode the measurement wire format: a JSON array of sensor objects
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    pub fn sensors(&self) -> &[SensorRecord] {
        &self.sensors
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SensorRecord> {
        self.sensors.iter()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a SensorRecord;
    type IntoIter = std::slice::Iter<'a, SensorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.sensors.iter()
    }
}
