//! The emotion-report engine: aggregation, bundling and orchestration.
//!
//! Everything here is read-only over an injected [`store::ReportStore`]
//! capability; the sqlx-backed implementation lives in `moodlog-db`, and
//! tests drive the engine with an in-memory fake.

pub mod aggregate;
pub mod bundle;
pub mod service;
pub mod store;

use thiserror::Error;

/// Error taxonomy for report generation.
///
/// Component-level errors bubble unchanged to the caller; nothing is
/// retried or downgraded inside the engine. A store failure mid-computation
/// surfaces here and never yields a partially merged report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid user id: {user_id}")]
    InvalidUserId { user_id: i64 },
    #[error("no user found for id {user_id}")]
    UserNotFound { user_id: i64 },
    #[error("invalid report period: {reason}")]
    InvalidDateSelector { reason: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub use aggregate::{EmotionAggregates, EmotionAggregator};
pub use bundle::{ModifiedEmotionBundle, ModifiedEmotionBundler};
pub use service::{EmotionReport, ReportService};
pub use store::{
    BaselineEmotionRecord, EmotionCount, ModifiedEmotionRecord, ReportStore, StoreError, UserRef,
};
