//! [`ReportStore`] implementation backed by the Postgres pool.

use chrono::{DateTime, Utc};
use moodlog_core::report::{
    BaselineEmotionRecord, EmotionCount, ModifiedEmotionRecord, ReportStore, StoreError, UserRef,
};
use moodlog_core::EmotionLabel;
use sqlx::PgPool;

use crate::{ai_analyses, emotions, posts, users, DbError};

impl From<DbError> for StoreError {
    fn from(error: DbError) -> Self {
        StoreError::new(error)
    }
}

/// The report engine's data-access capability over a shared [`PgPool`].
#[derive(Debug, Clone)]
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ReportStore for PgReportStore {
    async fn find_user_by_id(&self, user_id: i64) -> Result<Option<UserRef>, StoreError> {
        let row = users::find_user_by_id(&self.pool, user_id).await?;
        Ok(row.map(|user| UserRef {
            id: user.id,
            name: user.name,
        }))
    }

    async fn find_post_ids_by_user_and_range(
        &self,
        user_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<i64>, StoreError> {
        Ok(posts::find_post_ids_by_user_and_range(&self.pool, user_id, start, end).await?)
    }

    async fn group_emotion_counts_by_post_ids(
        &self,
        post_ids: &[i64],
    ) -> Result<Vec<EmotionCount>, StoreError> {
        let rows = emotions::group_emotion_counts_by_post_ids(&self.pool, post_ids).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| typed_count(&row.emotion, row.count))
            .collect())
    }

    async fn find_ai_analysis_ids_by_post_ids(
        &self,
        post_ids: &[i64],
    ) -> Result<Vec<i64>, StoreError> {
        Ok(ai_analyses::find_analysis_ids_by_post_ids(&self.pool, post_ids).await?)
    }

    async fn group_ai_emotion_counts_by_analysis_ids(
        &self,
        analysis_ids: &[i64],
    ) -> Result<Vec<EmotionCount>, StoreError> {
        let rows =
            ai_analyses::group_ai_emotion_counts_by_analysis_ids(&self.pool, analysis_ids).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| typed_count(&row.emotion, row.count))
            .collect())
    }

    async fn find_modified_emotion_records_with_notes(
        &self,
        post_ids: &[i64],
    ) -> Result<Vec<ModifiedEmotionRecord>, StoreError> {
        let rows = emotions::find_modified_emotions_with_notes(&self.pool, post_ids).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                row.emotion.parse().ok().map(|label| ModifiedEmotionRecord {
                    post_id: row.post_id,
                    label,
                    note_contents: row.note_contents,
                })
            })
            .collect())
    }

    async fn find_baseline_emotion_records(
        &self,
        post_ids: &[i64],
    ) -> Result<Vec<BaselineEmotionRecord>, StoreError> {
        let rows = emotions::find_baseline_emotions(&self.pool, post_ids).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                row.emotion.parse().ok().map(|label| BaselineEmotionRecord {
                    post_id: row.post_id,
                    label,
                })
            })
            .collect())
    }
}

// The emotion columns are CHECK-constrained to the catalog; a label that
// still fails to parse is dropped instead of failing the whole report.
fn typed_count(emotion: &str, count: i64) -> Option<EmotionCount> {
    emotion
        .parse::<EmotionLabel>()
        .ok()
        .map(|label| EmotionCount { label, count })
}
