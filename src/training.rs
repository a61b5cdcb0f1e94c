//! Distance, speed and calorie formulas
//!
//! Every activity converts its action count (steps or strokes) into distance
//! with a fixed stride length, derives mean speed from distance and duration,
//! and estimates energy expenditure with an activity-specific formula. The
//! arithmetic is plain `f64`, evaluated left to right in the order the tracker
//! reference output was produced with, so the three-decimal summaries match it
//! digit for digit. Results that leave the finite range surface as an error
//! instead of `inf`.

use tracing::debug;

use crate::error::{CalculationError, Result};
use crate::models::{Running, Session, SportsWalking, Swimming, TrainingKind, TrainingRecord};
use crate::summary::TrainingSummary;

/// Meters in a kilometer
pub const M_IN_KM: f64 = 1000.0;

/// Minutes in an hour
pub const MIN_IN_H: f64 = 60.0;

/// Shared behaviour of all activities
pub trait Training {
    /// Distance covered per action, in meters
    const LEN_STEP: f64 = 0.65;

    fn kind(&self) -> TrainingKind;

    fn session(&self) -> &Session;

    /// Distance in km
    fn distance(&self) -> Result<f64> {
        finite(
            f64::from(self.session().action()) * Self::LEN_STEP / M_IN_KM,
            "distance",
        )
    }

    /// Mean speed in km/h
    fn mean_speed(&self) -> Result<f64> {
        divide(self.distance()?, self.session().duration(), "mean speed")
    }

    /// Energy expenditure in kcal
    fn spent_calories(&self) -> Result<f64>;

    /// Compute all statistics of the session
    fn show_training_info(&self) -> Result<TrainingSummary> {
        let summary = TrainingSummary {
            training_type: self.kind(),
            duration: self.session().duration(),
            distance: self.distance()?,
            speed: self.mean_speed()?,
            calories: self.spent_calories()?,
        };

        debug!(
            training = %summary.training_type,
            distance = summary.distance,
            speed = summary.speed,
            calories = summary.calories,
            "Computed training statistics"
        );

        Ok(summary)
    }
}

impl Running {
    pub const CAL_1: f64 = 18.0;
    pub const CAL_2: f64 = 20.0;
}

impl Training for Running {
    fn kind(&self) -> TrainingKind {
        TrainingKind::Running
    }

    fn session(&self) -> &Session {
        Running::session(self)
    }

    fn spent_calories(&self) -> Result<f64> {
        let speed = self.mean_speed()?;
        let session = Running::session(self);

        finite(
            (Self::CAL_1 * speed - Self::CAL_2) * session.weight() / M_IN_KM
                * session.duration()
                * MIN_IN_H,
            "running calories",
        )
    }
}

impl SportsWalking {
    pub const CAL_1: f64 = 0.035;
    pub const CAL_2: f64 = 0.029;
}

impl Training for SportsWalking {
    fn kind(&self) -> TrainingKind {
        TrainingKind::SportsWalking
    }

    fn session(&self) -> &Session {
        SportsWalking::session(self)
    }

    fn spent_calories(&self) -> Result<f64> {
        let speed = self.mean_speed()?;
        let session = SportsWalking::session(self);
        let weight = session.weight();

        if self.height() == 0.0 {
            return Err(CalculationError::DivisionByZero {
                calculation: "walking calories".to_string(),
            }
            .into());
        }
        let speed_factor = floor_div(speed.powi(2), self.height());

        finite(
            (Self::CAL_1 * weight + speed_factor * Self::CAL_2 * weight)
                * (session.duration() * MIN_IN_H),
            "walking calories",
        )
    }
}

impl Swimming {
    pub const CAL_1: f64 = 1.1;
    pub const CAL_2: f64 = 2.0;
}

impl Training for Swimming {
    const LEN_STEP: f64 = 1.38;

    fn kind(&self) -> TrainingKind {
        TrainingKind::Swimming
    }

    fn session(&self) -> &Session {
        Swimming::session(self)
    }

    /// Speed comes from the pool laps, not from the stroke count
    fn mean_speed(&self) -> Result<f64> {
        let kilometers = self.length_pool() * f64::from(self.count_pool()) / M_IN_KM;
        divide(kilometers, Swimming::session(self).duration(), "mean speed")
    }

    fn spent_calories(&self) -> Result<f64> {
        let speed = self.mean_speed()?;
        let session = Swimming::session(self);

        finite(
            (speed + Self::CAL_1) * Self::CAL_2 * session.weight() * session.duration(),
            "swimming calories",
        )
    }
}

impl TrainingRecord {
    /// Compute distance, speed and calories for the record
    pub fn compute(&self) -> Result<TrainingSummary> {
        match self {
            TrainingRecord::Running(training) => training.show_training_info(),
            TrainingRecord::SportsWalking(training) => training.show_training_info(),
            TrainingRecord::Swimming(training) => training.show_training_info(),
        }
    }
}

/// Floored quotient rounded the way a float `//` operator does it
///
/// Computed from the remainder rather than as `(a / b).floor()`, which can
/// land one too high when `a / b` rounds up to a whole number.
pub fn floor_div(dividend: f64, divisor: f64) -> f64 {
    let remainder = dividend % divisor;
    let mut quotient = (dividend - remainder) / divisor;

    if remainder != 0.0 && (divisor < 0.0) != (remainder < 0.0) {
        quotient -= 1.0;
    }

    if quotient == 0.0 {
        return 0.0_f64.copysign(dividend / divisor);
    }

    let floored = quotient.floor();
    if quotient - floored > 0.5 {
        floored + 1.0
    } else {
        floored
    }
}

fn finite(value: f64, calculation: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalculationError::Overflow {
            calculation: calculation.to_string(),
        }
        .into())
    }
}

fn divide(dividend: f64, divisor: f64, calculation: &str) -> Result<f64> {
    if divisor == 0.0 {
        return Err(CalculationError::DivisionByZero {
            calculation: calculation.to_string(),
        }
        .into());
    }
    finite(dividend / divisor, calculation)
}
