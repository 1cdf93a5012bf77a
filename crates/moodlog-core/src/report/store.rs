//! The data-access capability the report engine is generic over.

use std::future::Future;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::emotion::EmotionLabel;

/// Opaque data-access failure.
///
/// The engine never inspects the cause; it wraps whatever the backing store
/// reports and surfaces it as [`super::ReportError::Store`].
#[derive(Debug, Error)]
#[error("data store query failed: {0}")]
pub struct StoreError(#[from] Box<dyn std::error::Error + Send + Sync>);

impl StoreError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(source.into())
    }
}

/// A user reference, as much as the report engine needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: i64,
    pub name: String,
}

/// One grouped-count row: how many emotion records carry `label`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmotionCount {
    pub label: EmotionLabel,
    pub count: i64,
}

/// One user-corrected (`modified = true`) emotion record together with the
/// one-line note contents attached to its post. The same post's notes repeat
/// on every record for that post; the bundler de-duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifiedEmotionRecord {
    pub post_id: i64,
    pub label: EmotionLabel,
    pub note_contents: Vec<String>,
}

/// One baseline (`modified = false`) emotion record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaselineEmotionRecord {
    pub post_id: i64,
    pub label: EmotionLabel,
}

/// Read contract the report engine needs from the persistent store.
///
/// All methods are read-only; implementations must restrict post lookups to
/// non-deleted posts and treat the date range as half-open `[start, end)`.
pub trait ReportStore: Send + Sync {
    fn find_user_by_id(
        &self,
        user_id: i64,
    ) -> impl Future<Output = Result<Option<UserRef>, StoreError>> + Send;

    fn find_post_ids_by_user_and_range(
        &self,
        user_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<i64>, StoreError>> + Send;

    fn group_emotion_counts_by_post_ids(
        &self,
        post_ids: &[i64],
    ) -> impl Future<Output = Result<Vec<EmotionCount>, StoreError>> + Send;

    fn find_ai_analysis_ids_by_post_ids(
        &self,
        post_ids: &[i64],
    ) -> impl Future<Output = Result<Vec<i64>, StoreError>> + Send;

    fn group_ai_emotion_counts_by_analysis_ids(
        &self,
        analysis_ids: &[i64],
    ) -> impl Future<Output = Result<Vec<EmotionCount>, StoreError>> + Send;

    fn find_modified_emotion_records_with_notes(
        &self,
        post_ids: &[i64],
    ) -> impl Future<Output = Result<Vec<ModifiedEmotionRecord>, StoreError>> + Send;

    fn find_baseline_emotion_records(
        &self,
        post_ids: &[i64],
    ) -> impl Future<Output = Result<Vec<BaselineEmotionRecord>, StoreError>> + Send;
}
