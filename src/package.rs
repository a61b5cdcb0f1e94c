//! Sensor packages: a workout code followed by raw values
//!
//! A package is what the tracker sends, e.g. `SWM 720 1 80 25 40`. Values stay
//! as text until [`WorkoutPackage::to_record`] validates them.

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::str::FromStr;
use tracing::debug;

use crate::error::{Result, TrainStatsError, ValidationError};
use crate::models::{Running, SportsWalking, Swimming, TrainingKind, TrainingRecord};

/// Raw workout data as received from a tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPackage {
    pub kind: TrainingKind,
    pub data: Vec<String>,
}

impl WorkoutPackage {
    pub fn new<I, S>(kind: TrainingKind, data: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            data: data.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse every value and build the matching training record
    pub fn to_record(&self) -> Result<TrainingRecord> {
        let fields = self.kind.fields();
        let values = self
            .data
            .iter()
            .enumerate()
            .map(|(i, raw)| parse_value(fields.get(i).copied().unwrap_or("value"), raw))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        read_package(self.kind, &values)
    }
}

impl FromStr for WorkoutPackage {
    type Err = TrainStatsError;

    fn from_str(s: &str) -> Result<Self> {
        let mut tokens = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty());

        let kind: TrainingKind = tokens.next().ok_or(ValidationError::EmptyPackage)?.parse()?;
        Ok(Self::new(kind, tokens))
    }
}

/// Build a training record from already parsed package values
///
/// Values follow [`TrainingKind::fields`] order. The action count and the
/// pool count must be whole numbers.
pub fn read_package(kind: TrainingKind, values: &[f64]) -> Result<TrainingRecord> {
    let fields = kind.fields();
    if values.len() != fields.len() {
        return Err(ValidationError::ArgumentCount {
            training: kind.name().to_string(),
            expected: fields.len(),
            actual: values.len(),
        }
        .into());
    }

    let action = whole_number("action", values[0])?;
    let (duration, weight) = (values[1], values[2]);

    let record = match kind {
        TrainingKind::Running => Running::new(action, duration, weight)?.into(),
        TrainingKind::SportsWalking => SportsWalking::new(action, duration, weight, values[3])?.into(),
        TrainingKind::Swimming => {
            let count_pool = whole_number("count_pool", values[4])?;
            Swimming::new(action, duration, weight, values[3], count_pool)?.into()
        }
    };

    Ok(record)
}

/// The packages the tracker demo ships with
pub fn sample_packages() -> Vec<WorkoutPackage> {
    vec![
        WorkoutPackage::new(TrainingKind::Swimming, ["720", "1", "80", "25", "40"]),
        WorkoutPackage::new(TrainingKind::Running, ["15000", "1", "75"]),
        WorkoutPackage::new(TrainingKind::SportsWalking, ["9000", "1", "75", "180"]),
    ]
}

/// Read packages from CSV rows like `RUN,15000,1,75`
///
/// Rows may differ in length, there is no header and lines starting with `#`
/// are skipped. Every row is validated while reading, so a bad value is
/// reported with its line number. Empty fields are errors, not padding.
pub fn import_packages<R: Read>(reader: R) -> Result<Vec<WorkoutPackage>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut packages = Vec::new();
    for row in csv_reader.records() {
        let row = row.map_err(|err| TrainStatsError::Import {
            line: err.position().map(|p| p.line()).unwrap_or(0),
            reason: err.to_string(),
        })?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        if row.iter().all(str::is_empty) {
            continue;
        }

        let mut fields = row.iter();
        let package = fields
            .next()
            .unwrap_or_default()
            .parse::<TrainingKind>()
            .map(|kind| WorkoutPackage::new(kind, fields))
            .map_err(TrainStatsError::from)
            .and_then(|package| package.to_record().map(|_| package))
            .map_err(|err| TrainStatsError::Import {
                line,
                reason: import_reason(err),
            })?;

        packages.push(package);
    }

    debug!(count = packages.len(), "Imported workout packages");
    Ok(packages)
}

fn import_reason(err: TrainStatsError) -> String {
    match err {
        TrainStatsError::Validation(err) => err.to_string(),
        TrainStatsError::Calculation(err) => err.to_string(),
        TrainStatsError::Import { reason, .. } => reason,
    }
}

fn parse_value(field: &str, raw: &str) -> std::result::Result<f64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::EmptyValue {
            field: field.to_string(),
        });
    }

    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ValidationError::InvalidNumber {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

fn whole_number(field: &str, value: f64) -> std::result::Result<u32, ValidationError> {
    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    if value.fract() != 0.0 {
        return Err(ValidationError::NotAnInteger {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    if value > f64::from(u32::MAX) {
        return Err(ValidationError::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(value as u32)
}
