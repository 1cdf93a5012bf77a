//! Database operations for the `ai_analyses` and `ai_analyzed_emotions` tables.

use moodlog_core::{EmotionLabel, SignalNoise};
use sqlx::PgPool;

use crate::emotions::EmotionCountRow;
use crate::DbError;

/// Returns the analysis ids attached to the given posts, ordered by id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_analysis_ids_by_post_ids(
    pool: &PgPool,
    post_ids: &[i64],
) -> Result<Vec<i64>, DbError> {
    let rows: Vec<(i64,)> = sqlx::query_as(
        "SELECT id \
         FROM ai_analyses \
         WHERE post_id = ANY($1) \
         ORDER BY id",
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Group analyzed-emotion rows for the given analyses by label and count
/// each group.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn group_ai_emotion_counts_by_analysis_ids(
    pool: &PgPool,
    analysis_ids: &[i64],
) -> Result<Vec<EmotionCountRow>, DbError> {
    let rows = sqlx::query_as::<_, EmotionCountRow>(
        "SELECT emotion, COUNT(*) AS count \
         FROM ai_analyzed_emotions \
         WHERE analysis_id = ANY($1) \
         GROUP BY emotion \
         ORDER BY emotion",
    )
    .bind(analysis_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Insert or replace the AI analysis for a post and return the analysis id.
///
/// A post holds at most one analysis (unique on `post_id`). Re-analysis
/// upserts the verdict, drops the previous emotion breakdown, inserts the
/// new one, and stamps the verdict onto the post row, all in one
/// transaction; repeated calls can never inflate later aggregates.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement in the transaction fails.
pub async fn upsert_ai_analysis(
    pool: &PgPool,
    post_id: i64,
    verdict: SignalNoise,
    emotions: &[(EmotionLabel, f64)],
) -> Result<i64, DbError> {
    let mut tx = pool.begin().await?;

    let analysis_id: i64 = sqlx::query_scalar(
        "INSERT INTO ai_analyses (post_id, signal_noise) \
         VALUES ($1, $2) \
         ON CONFLICT (post_id) DO UPDATE \
             SET signal_noise = EXCLUDED.signal_noise, created_at = NOW() \
         RETURNING id",
    )
    .bind(post_id)
    .bind(verdict.as_str())
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM ai_analyzed_emotions WHERE analysis_id = $1")
        .bind(analysis_id)
        .execute(&mut *tx)
        .await?;

    for (label, percentage) in emotions {
        sqlx::query(
            "INSERT INTO ai_analyzed_emotions (analysis_id, emotion, percentage) \
             VALUES ($1, $2, $3)",
        )
        .bind(analysis_id)
        .bind(label.as_str())
        .bind(*percentage)
        .execute(&mut *tx)
        .await?;
    }

    sqlx::query("UPDATE posts SET signal_noise = $1, updated_at = NOW() WHERE id = $2")
        .bind(verdict.as_str())
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(analysis_id)
}
