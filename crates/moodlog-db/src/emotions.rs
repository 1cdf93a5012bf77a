//! Database operations for the `post_emotions` table.

use std::collections::HashSet;

use moodlog_core::EmotionLabel;
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// One grouped-count row: how many emotion records carry `emotion`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EmotionCountRow {
    pub emotion: String,
    pub count: i64,
}

/// A row from the `post_emotions` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostEmotionRow {
    pub post_id: i64,
    pub emotion: String,
    pub modified: bool,
}

/// A user-corrected emotion row joined with its post's one-line note
/// contents. The same post's notes repeat on every row for that post.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ModifiedEmotionNoteRow {
    pub post_id: i64,
    pub emotion: String,
    pub note_contents: Vec<String>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Group all emotion records (baseline and corrected) for the given posts by
/// label and count each group.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn group_emotion_counts_by_post_ids(
    pool: &PgPool,
    post_ids: &[i64],
) -> Result<Vec<EmotionCountRow>, DbError> {
    let rows = sqlx::query_as::<_, EmotionCountRow>(
        "SELECT emotion, COUNT(*) AS count \
         FROM post_emotions \
         WHERE post_id = ANY($1) \
         GROUP BY emotion \
         ORDER BY emotion",
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns corrected (`modified = TRUE`) emotion rows for the given posts,
/// each carrying the full set of one-line note contents of its post.
///
/// A corrected row whose post has no notes still comes back, with an empty
/// `note_contents` array. Ordered by post id descending, then row id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_modified_emotions_with_notes(
    pool: &PgPool,
    post_ids: &[i64],
) -> Result<Vec<ModifiedEmotionNoteRow>, DbError> {
    let rows = sqlx::query_as::<_, ModifiedEmotionNoteRow>(
        "SELECT pe.post_id, \
                pe.emotion, \
                COALESCE( \
                    array_agg(oln.content) FILTER (WHERE oln.content IS NOT NULL), \
                    ARRAY[]::VARCHAR[] \
                ) AS note_contents \
         FROM post_emotions pe \
         LEFT JOIN one_line_notes oln ON oln.post_id = pe.post_id \
         WHERE pe.post_id = ANY($1) \
           AND pe.modified = TRUE \
         GROUP BY pe.id, pe.post_id, pe.emotion \
         ORDER BY pe.post_id DESC, pe.id",
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns baseline (`modified = FALSE`) emotion rows for the given posts,
/// ordered by post id then row id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_baseline_emotions(
    pool: &PgPool,
    post_ids: &[i64],
) -> Result<Vec<PostEmotionRow>, DbError> {
    let rows = sqlx::query_as::<_, PostEmotionRow>(
        "SELECT post_id, emotion, modified \
         FROM post_emotions \
         WHERE post_id = ANY($1) \
           AND modified = FALSE \
         ORDER BY post_id, id",
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Replace a post's corrected emotions with the given labels.
///
/// In one transaction: deletes every existing `modified = TRUE` row for the
/// post, then inserts one corrected row per requested label. Labels already
/// present as baseline keep their baseline row instead of gaining a
/// duplicate correction. Input duplicates are inserted once.
///
/// Returns the post's full emotion rows after the replacement.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement in the transaction fails.
pub async fn replace_modified_emotions(
    pool: &PgPool,
    post_id: i64,
    labels: &[EmotionLabel],
) -> Result<Vec<PostEmotionRow>, DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM post_emotions WHERE post_id = $1 AND modified = TRUE")
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

    let baseline_rows: Vec<(String,)> =
        sqlx::query_as("SELECT emotion FROM post_emotions WHERE post_id = $1 AND modified = FALSE")
            .bind(post_id)
            .fetch_all(&mut *tx)
            .await?;
    let baseline: HashSet<String> = baseline_rows.into_iter().map(|(e,)| e).collect();

    let mut seen: HashSet<&str> = HashSet::new();
    for label in labels {
        let name = label.as_str();
        if baseline.contains(name) || !seen.insert(name) {
            continue;
        }
        sqlx::query("INSERT INTO post_emotions (post_id, emotion, modified) VALUES ($1, $2, TRUE)")
            .bind(post_id)
            .bind(name)
            .execute(&mut *tx)
            .await?;
    }

    let rows = sqlx::query_as::<_, PostEmotionRow>(
        "SELECT post_id, emotion, modified \
         FROM post_emotions \
         WHERE post_id = $1 \
         ORDER BY id",
    )
    .bind(post_id)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(rows)
}
