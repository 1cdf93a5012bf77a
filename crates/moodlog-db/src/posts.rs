//! Database operations for the `posts` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// Returns the ids of a user's non-deleted posts whose journaled day falls
/// in the half-open interval `[start, end)`, ordered by id ascending.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_post_ids_by_user_and_range(
    pool: &PgPool,
    user_id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<i64>, DbError> {
    let rows: Vec<(i64,)> = sqlx::query_as(
        "SELECT id \
         FROM posts \
         WHERE user_id = $1 \
           AND is_deleted = FALSE \
           AND date >= $2 \
           AND date < $3 \
         ORDER BY id",
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Whether a non-deleted post with the given id exists.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn post_exists(pool: &PgPool, post_id: i64) -> Result<bool, DbError> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM posts WHERE id = $1 AND is_deleted = FALSE)",
    )
    .bind(post_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}
