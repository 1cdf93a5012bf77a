//! Domain types and the report engine for the moodlog journaling backend.

pub mod app_config;
pub mod config;
pub mod emotion;
pub mod percentages;
pub mod period;
pub mod report;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use emotion::{EmotionLabel, ParseEmotionError, SignalNoise, SIGNAL_THRESHOLD};
pub use period::ReportPeriod;
pub use report::{
    EmotionReport, ModifiedEmotionBundle, ReportError, ReportService, ReportStore, StoreError,
};
