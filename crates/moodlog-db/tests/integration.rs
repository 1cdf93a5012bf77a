//! Offline unit tests for moodlog-db pool configuration and row types.
//! These tests do not require a live database connection.

use moodlog_core::{AppConfig, Environment};
use moodlog_db::{EmotionCountRow, ModifiedEmotionNoteRow, PoolConfig, PostEmotionRow, UserRow};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`UserRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn user_row_has_expected_fields() {
    use chrono::Utc;

    let row = UserRow {
        id: 1_i64,
        name: "Dana".to_string(),
        email: "dana@example.com".to_string(),
        created_at: Utc::now(),
    };

    assert_eq!(row.id, 1);
    assert_eq!(row.name, "Dana");
    assert_eq!(row.email, "dana@example.com");
}

#[test]
fn post_emotion_row_has_expected_fields() {
    let row = PostEmotionRow {
        post_id: 12_i64,
        emotion: "Happy".to_string(),
        modified: true,
    };

    assert_eq!(row.post_id, 12);
    assert_eq!(row.emotion, "Happy");
    assert!(row.modified);
}

#[test]
fn modified_emotion_note_row_has_expected_fields() {
    let row = ModifiedEmotionNoteRow {
        post_id: 7_i64,
        emotion: "Worried".to_string(),
        note_contents: vec!["first".to_string(), "second".to_string()],
    };

    assert_eq!(row.post_id, 7);
    assert_eq!(row.note_contents.len(), 2);
}

#[test]
fn emotion_count_row_has_expected_fields() {
    let row = EmotionCountRow {
        emotion: "Sad".to_string(),
        count: 3_i64,
    };

    assert_eq!(row.emotion, "Sad");
    assert_eq!(row.count, 3);
}
