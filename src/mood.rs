//! Happiness metric over a sensor snapshot.
//!
//! A sensor counts as happy when its mood is `happy` and it is not a legacy
//! (pre-existing) sensor. The metric is the happy share of all known sensors, as a
//! percentage. An empty snapshot has no meaningful share and yields
//! [`HappyPercent::Undefined`], which never clears a threshold.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::sensors::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum HappyPercent {
    /// Share in [0, 100]
    Measured(f64),
    /// No sensors to measure
    Undefined,
}

impl HappyPercent {
    pub fn value(&self) -> Option<f64> {
        match self {
            HappyPercent::Measured(v) => Some(*v),
            HappyPercent::Undefined => None,
        }
    }

    /// Strictly above the threshold. Undefined is never above anything.
    pub fn exceeds(&self, threshold: i64) -> bool {
        match self {
            HappyPercent::Measured(v) => *v > threshold as f64,
            HappyPercent::Undefined => false,
        }
    }
}

impl fmt::Display for HappyPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HappyPercent::Measured(v) => write!(f, "{:.2}", v),
            HappyPercent::Undefined => f.write_str("n/a"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Sad,
}

impl Mood {
    /// `Happy` iff the percentage is strictly greater than the threshold
    pub fn classify(percent: HappyPercent, threshold: i64) -> Self {
        if percent.exceeds(threshold) {
            Mood::Happy
        } else {
            Mood::Sad
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn happy_count(snapshot: &Snapshot) -> usize {
    snapshot.iter().filter(|s| s.counts_as_happy()).count()
}

pub fn compute_happy_percent(snapshot: &Snapshot) -> HappyPercent {
    if snapshot.is_empty() {
        return HappyPercent::Undefined;
    }
    let happy = happy_count(snapshot) as f64;
    HappyPercent::Measured(happy / snapshot.len() as f64 * 100.0)
}
