//! Live-database tests for the report queries and write policies.

use chrono::{DateTime, Utc};
use moodlog_core::{EmotionLabel, ReportPeriod, ReportService, SignalNoise};
use moodlog_db::PgReportStore;
use sqlx::PgPool;

fn utc(s: &str) -> DateTime<Utc> {
    s.parse().expect("timestamp literal")
}

async fn seed_user(pool: &PgPool, email: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id")
        .bind("Dana")
        .bind(email)
        .fetch_one(pool)
        .await
        .expect("seed user")
}

async fn seed_post(pool: &PgPool, user_id: i64, date: DateTime<Utc>) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO posts (user_id, content, date) VALUES ($1, 'entry', $2) RETURNING id",
    )
    .bind(user_id)
    .bind(date)
    .fetch_one(pool)
    .await
    .expect("seed post")
}

async fn seed_emotion(pool: &PgPool, post_id: i64, emotion: &str, modified: bool) {
    sqlx::query("INSERT INTO post_emotions (post_id, emotion, modified) VALUES ($1, $2, $3)")
        .bind(post_id)
        .bind(emotion)
        .bind(modified)
        .execute(pool)
        .await
        .expect("seed emotion");
}

async fn seed_note(pool: &PgPool, post_id: i64, content: &str) {
    sqlx::query("INSERT INTO one_line_notes (post_id, content) VALUES ($1, $2)")
        .bind(post_id)
        .bind(content)
        .execute(pool)
        .await
        .expect("seed note");
}

#[sqlx::test(migrations = "../../migrations")]
async fn post_range_is_half_open_and_skips_deleted(pool: PgPool) {
    let user_id = seed_user(&pool, "range@example.com").await;
    let at_start = seed_post(&pool, user_id, utc("2025-01-01T00:00:00Z")).await;
    let mid_year = seed_post(&pool, user_id, utc("2025-06-15T09:30:00Z")).await;
    let _at_end = seed_post(&pool, user_id, utc("2026-01-01T00:00:00Z")).await;

    let deleted = seed_post(&pool, user_id, utc("2025-03-03T00:00:00Z")).await;
    sqlx::query("UPDATE posts SET is_deleted = TRUE, deleted_at = NOW() WHERE id = $1")
        .bind(deleted)
        .execute(&pool)
        .await
        .expect("soft delete");

    let ids = moodlog_db::find_post_ids_by_user_and_range(
        &pool,
        user_id,
        utc("2025-01-01T00:00:00Z"),
        utc("2026-01-01T00:00:00Z"),
    )
    .await
    .expect("query");

    assert_eq!(ids, vec![at_start, mid_year]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn modified_rows_carry_note_arrays(pool: PgPool) {
    let user_id = seed_user(&pool, "notes@example.com").await;
    let noted = seed_post(&pool, user_id, utc("2025-02-01T00:00:00Z")).await;
    let bare = seed_post(&pool, user_id, utc("2025-02-02T00:00:00Z")).await;

    seed_emotion(&pool, noted, "Happy", true).await;
    seed_note(&pool, noted, "first").await;
    seed_note(&pool, noted, "second").await;
    seed_emotion(&pool, bare, "Sad", true).await;

    let rows = moodlog_db::find_modified_emotions_with_notes(&pool, &[noted, bare])
        .await
        .expect("query");

    assert_eq!(rows.len(), 2);
    let noted_row = rows.iter().find(|r| r.post_id == noted).expect("noted row");
    let mut contents = noted_row.note_contents.clone();
    contents.sort();
    assert_eq!(contents, vec!["first", "second"]);

    let bare_row = rows.iter().find(|r| r.post_id == bare).expect("bare row");
    assert!(bare_row.note_contents.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn replace_modified_emotions_skips_baseline_and_dedupes(pool: PgPool) {
    let user_id = seed_user(&pool, "replace@example.com").await;
    let post_id = seed_post(&pool, user_id, utc("2025-04-01T00:00:00Z")).await;

    seed_emotion(&pool, post_id, "Happy", false).await; // baseline
    seed_emotion(&pool, post_id, "Sad", true).await; // stale correction

    let rows = moodlog_db::replace_modified_emotions(
        &pool,
        post_id,
        &[EmotionLabel::Happy, EmotionLabel::Angry, EmotionLabel::Angry],
    )
    .await
    .expect("replace");

    let baseline: Vec<&str> = rows
        .iter()
        .filter(|r| !r.modified)
        .map(|r| r.emotion.as_str())
        .collect();
    let corrected: Vec<&str> = rows
        .iter()
        .filter(|r| r.modified)
        .map(|r| r.emotion.as_str())
        .collect();

    assert_eq!(baseline, vec!["Happy"], "baseline rows stay untouched");
    assert_eq!(
        corrected,
        vec!["Angry"],
        "stale corrections dropped, baseline collisions skipped, input de-duplicated"
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn reanalysis_replaces_the_previous_breakdown(pool: PgPool) {
    let user_id = seed_user(&pool, "analysis@example.com").await;
    let post_id = seed_post(&pool, user_id, utc("2025-05-01T00:00:00Z")).await;

    moodlog_db::upsert_ai_analysis(
        &pool,
        post_id,
        SignalNoise::Noise,
        &[(EmotionLabel::Sad, 60.0), (EmotionLabel::Happy, 40.0)],
    )
    .await
    .expect("first analysis");

    moodlog_db::upsert_ai_analysis(
        &pool,
        post_id,
        SignalNoise::Signal,
        &[(EmotionLabel::Happy, 80.0), (EmotionLabel::Smile, 20.0)],
    )
    .await
    .expect("second analysis");

    let analysis_ids = moodlog_db::find_analysis_ids_by_post_ids(&pool, &[post_id])
        .await
        .expect("ids");
    assert_eq!(analysis_ids.len(), 1, "one analysis per post");

    let counts = moodlog_db::group_ai_emotion_counts_by_analysis_ids(&pool, &analysis_ids)
        .await
        .expect("counts");
    let labels: Vec<&str> = counts.iter().map(|c| c.emotion.as_str()).collect();
    assert_eq!(labels, vec!["Happy", "Smile"]);
    assert!(counts.iter().all(|c| c.count == 1));

    let verdict: Option<String> =
        sqlx::query_scalar("SELECT signal_noise FROM posts WHERE id = $1")
            .bind(post_id)
            .fetch_one(&pool)
            .await
            .expect("post verdict");
    assert_eq!(verdict.as_deref(), Some("Signal"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn pg_store_generates_a_full_report(pool: PgPool) {
    let user_id = seed_user(&pool, "report@example.com").await;

    let first = seed_post(&pool, user_id, utc("2025-03-10T00:00:00Z")).await;
    let second = seed_post(&pool, user_id, utc("2025-07-20T00:00:00Z")).await;
    seed_emotion(&pool, first, "Happy", false).await;
    seed_emotion(&pool, second, "Happy", false).await;
    seed_emotion(&pool, second, "Worried", true).await;
    seed_note(&pool, second, "rethought this day").await;

    moodlog_db::upsert_ai_analysis(
        &pool,
        first,
        SignalNoise::Signal,
        &[(EmotionLabel::Happy, 70.0), (EmotionLabel::Sad, 30.0)],
    )
    .await
    .expect("analysis");

    let service = ReportService::new(PgReportStore::new(pool));
    let period = ReportPeriod::yearly(2025).expect("period");
    let report = service.generate(user_id, period).await.expect("report");

    assert_eq!(report.post_ids, vec![first, second]);
    assert_eq!(report.emotion_counts[&EmotionLabel::Happy], 2);
    assert_eq!(report.emotion_counts[&EmotionLabel::Worried], 1);
    assert_eq!(report.emotion_percentages[&EmotionLabel::Happy], 66.67);
    assert_eq!(report.ai_emotion_percentages[&EmotionLabel::Happy], 50.0);
    assert_eq!(report.ai_emotion_percentages[&EmotionLabel::Sad], 50.0);

    assert_eq!(report.modified_emotion_bundles.len(), 1);
    let bundle = &report.modified_emotion_bundles[0];
    assert_eq!(bundle.post_id, second);
    assert_eq!(bundle.one_line_contents, vec!["rethought this day"]);
    assert_eq!(bundle.modified_true_emotions, vec![EmotionLabel::Worried]);
    assert_eq!(bundle.modified_false_emotions, vec![EmotionLabel::Happy]);
}
