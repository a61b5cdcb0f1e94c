// Library interface for trainstats modules
// This allows integration tests to access the core functionality

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod package;
pub mod summary;
pub mod training;

// Re-export commonly used types for convenience
pub use config::{AppConfig, OutputSettings};
pub use error::{CalculationError, Result, TrainStatsError, ValidationError};
pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
pub use models::{Running, Session, SportsWalking, Swimming, TrainingKind, TrainingRecord};
pub use package::{import_packages, read_package, sample_packages, WorkoutPackage};
pub use summary::{OutputFormat, TrainingSummary};
pub use training::Training;
