use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Activity types supported by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainingKind {
    Running,
    SportsWalking,
    Swimming,
}

impl TrainingKind {
    pub const ALL: [TrainingKind; 3] = [
        TrainingKind::Running,
        TrainingKind::SportsWalking,
        TrainingKind::Swimming,
    ];

    /// Three-letter code used by sensor packages
    pub fn code(&self) -> &'static str {
        match self {
            TrainingKind::Running => "RUN",
            TrainingKind::SportsWalking => "WLK",
            TrainingKind::Swimming => "SWM",
        }
    }

    /// Name shown in the training summary
    pub fn name(&self) -> &'static str {
        match self {
            TrainingKind::Running => "Running",
            TrainingKind::SportsWalking => "SportsWalking",
            TrainingKind::Swimming => "Swimming",
        }
    }

    /// Field names of a package for this activity, in package order
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            TrainingKind::Running => &["action", "duration", "weight"],
            TrainingKind::SportsWalking => &["action", "duration", "weight", "height"],
            TrainingKind::Swimming => &["action", "duration", "weight", "length_pool", "count_pool"],
        }
    }
}

impl fmt::Display for TrainingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TrainingKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        TrainingKind::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or_else(|| ValidationError::UnknownWorkoutCode {
                code: s.trim().to_string(),
            })
    }
}

/// Values every training shares
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    action: u32,
    duration: f64,
    weight: f64,
}

impl Session {
    /// `action` is the step or stroke count, `duration` is in hours and
    /// `weight` in kg
    pub fn new(action: u32, duration: f64, weight: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            action,
            duration: positive("duration", duration)?,
            weight: non_negative("weight", weight)?,
        })
    }

    pub fn action(&self) -> u32 {
        self.action
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// Running session
#[derive(Debug, Clone, PartialEq)]
pub struct Running {
    session: Session,
}

/// Sports walking session, also needs the walker's height
#[derive(Debug, Clone, PartialEq)]
pub struct SportsWalking {
    session: Session,
    height: f64,
}

/// Pool swimming session
#[derive(Debug, Clone, PartialEq)]
pub struct Swimming {
    session: Session,
    length_pool: f64,
    count_pool: u32,
}

impl Running {
    pub fn new(action: u32, duration: f64, weight: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            session: Session::new(action, duration, weight)?,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

impl SportsWalking {
    /// `height` is in cm and must be greater than zero
    pub fn new(
        action: u32,
        duration: f64,
        weight: f64,
        height: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            session: Session::new(action, duration, weight)?,
            height: positive("height", height)?,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

impl Swimming {
    /// `length_pool` is in meters, `count_pool` is how many times the pool
    /// was crossed
    pub fn new(
        action: u32,
        duration: f64,
        weight: f64,
        length_pool: f64,
        count_pool: u32,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            session: Session::new(action, duration, weight)?,
            length_pool: non_negative("length_pool", length_pool)?,
            count_pool,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn length_pool(&self) -> f64 {
        self.length_pool
    }

    pub fn count_pool(&self) -> u32 {
        self.count_pool
    }
}

/// One training session of any supported activity
#[derive(Debug, Clone, PartialEq)]
pub enum TrainingRecord {
    Running(Running),
    SportsWalking(SportsWalking),
    Swimming(Swimming),
}

impl TrainingRecord {
    pub fn kind(&self) -> TrainingKind {
        match self {
            TrainingRecord::Running(_) => TrainingKind::Running,
            TrainingRecord::SportsWalking(_) => TrainingKind::SportsWalking,
            TrainingRecord::Swimming(_) => TrainingKind::Swimming,
        }
    }
}

impl From<Running> for TrainingRecord {
    fn from(training: Running) -> Self {
        TrainingRecord::Running(training)
    }
}

impl From<SportsWalking> for TrainingRecord {
    fn from(training: SportsWalking) -> Self {
        TrainingRecord::SportsWalking(training)
    }
}

impl From<Swimming> for TrainingRecord {
    fn from(training: Swimming) -> Self {
        TrainingRecord::Swimming(training)
    }
}

fn positive(field: &str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

fn non_negative(field: &str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if value < 0.0 {
        Err(ValidationError::Negative {
            field: field.to_string(),
            value: value.to_string(),
        })
    } else {
        Ok(value)
    }
}

fn finite(field: &str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes() {
        assert_eq!("RUN".parse::<TrainingKind>().unwrap(), TrainingKind::Running);
        assert_eq!("wlk".parse::<TrainingKind>().unwrap(), TrainingKind::SportsWalking);
        assert_eq!(" SWM ".parse::<TrainingKind>().unwrap(), TrainingKind::Swimming);
        assert_eq!(
            "BIK".parse::<TrainingKind>(),
            Err(ValidationError::UnknownWorkoutCode { code: "BIK".to_string() })
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(TrainingKind::SportsWalking.to_string(), "SportsWalking");
        assert_eq!(TrainingKind::Swimming.fields().len(), 5);
    }

    #[test]
    fn test_zero_duration_rejected() {
        let err = Running::new(15000, 0.0, 75.0).unwrap_err();
        assert!(matches!(err, ValidationError::NotPositive { ref field, .. } if field == "duration"));
    }

    #[test]
    fn test_negative_fields_rejected() {
        assert!(matches!(
            Running::new(15000, 1.0, -75.0),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            Swimming::new(720, 1.0, 80.0, -25.0, 40),
            Err(ValidationError::Negative { .. })
        ));
    }

    #[test]
    fn test_walking_needs_height() {
        assert!(matches!(
            SportsWalking::new(9000, 1.0, 75.0, 0.0),
            Err(ValidationError::NotPositive { ref field, .. }) if field == "height"
        ));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        assert!(matches!(
            Running::new(15000, f64::INFINITY, 75.0),
            Err(ValidationError::InvalidNumber { ref field, .. }) if field == "duration"
        ));
        assert!(matches!(
            SportsWalking::new(9000, 1.0, f64::NAN, 180.0),
            Err(ValidationError::InvalidNumber { ref field, .. }) if field == "weight"
        ));
    }

    #[test]
    fn test_zero_weight_allowed() {
        let running = Running::new(0, 0.5, 0.0).unwrap();
        assert_eq!(running.session().weight(), 0.0);
        assert_eq!(TrainingRecord::from(running).kind(), TrainingKind::Running);
    }
}
