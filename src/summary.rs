//! Human-readable and JSON rendering of computed training statistics

use serde::{ser, Deserialize, Serialize, Serializer};
use std::fmt;

use crate::models::TrainingKind;

/// Decimal places used when presenting statistics
pub const DISPLAY_PRECISION: usize = 3;

/// Statistics of one training session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingSummary {
    #[serde(serialize_with = "serialize_kind")]
    pub training_type: TrainingKind,
    /// Hours
    #[serde(serialize_with = "serialize_rounded")]
    pub duration: f64,
    /// Kilometers
    #[serde(serialize_with = "serialize_rounded")]
    pub distance: f64,
    /// km/h
    #[serde(serialize_with = "serialize_rounded")]
    pub speed: f64,
    /// kcal
    #[serde(serialize_with = "serialize_rounded")]
    pub calories: f64,
}

impl TrainingSummary {
    /// One-line summary with every value at three decimal places
    pub fn message(&self) -> String {
        format!(
            "Training type: {}; Duration: {} h.; Distance: {} km; Speed: {} km/h; Calories: {}.",
            self.training_type,
            fixed(self.duration),
            fixed(self.distance),
            fixed(self.speed),
            fixed(self.calories),
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for TrainingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// How summaries are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `Training type: ...` sentence
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl OutputFormat {
    pub fn render(&self, summary: &TrainingSummary) -> serde_json::Result<String> {
        match self {
            OutputFormat::Text => Ok(summary.message()),
            OutputFormat::Json => summary.to_json(),
        }
    }
}

/// Fixed-point text with exactly [`DISPLAY_PRECISION`] decimals
///
/// The digits come from the exact binary value, so `0.0195` (stored just
/// below the midpoint) prints as `0.019`.
pub fn fixed(value: f64) -> String {
    format!("{:.*}", DISPLAY_PRECISION, value)
}

fn serialize_kind<S: Serializer>(kind: &TrainingKind, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(kind.name())
}

fn serialize_rounded<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    let rounded: f64 = fixed(*value)
        .parse()
        .map_err(<S::Error as ser::Error>::custom)?;
    serializer.serialize_f64(rounded)
}
