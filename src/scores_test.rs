use super::*;

fn temp_dir(label: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("edulearn-{label}-{}-{nanos}", std::process::id()))
}

fn entry(score: u32) -> ScoreEntry {
    ScoreEntry { score, subject: None, duration: 2, timestamp: "2026-01-01T00:00:00Z".into() }
}

// =============================================================================
// duration_minutes
// =============================================================================

#[test]
fn duration_rounds_to_nearest_minute() {
    assert_eq!(duration_minutes(Duration::from_secs(0)), 0);
    assert_eq!(duration_minutes(Duration::from_secs(29)), 0);
    assert_eq!(duration_minutes(Duration::from_secs(30)), 1);
    assert_eq!(duration_minutes(Duration::from_secs(89)), 1);
    assert_eq!(duration_minutes(Duration::from_secs(150)), 3);
}

// =============================================================================
// ScoreEntry
// =============================================================================

#[test]
fn essay_entry_omits_subject() {
    let json = serde_json::to_value(entry(85)).unwrap();
    assert_eq!(json, serde_json::json!({ "score": 85, "duration": 2, "timestamp": "2026-01-01T00:00:00Z" }));
}

#[test]
fn quiz_entry_carries_subject() {
    let e = ScoreEntry { subject: Some("Photosynthesis".into()), ..entry(60) };
    let json = serde_json::to_value(e).unwrap();
    assert_eq!(json["subject"], "Photosynthesis");
}

#[test]
fn now_stamps_rfc3339() {
    let e = ScoreEntry::now(70, Duration::from_secs(120), None).unwrap();
    assert_eq!(e.duration, 2);
    assert!(OffsetDateTime::parse(&e.timestamp, &Rfc3339).is_ok());
}

#[test]
fn unformattable_timestamp_is_an_error_not_empty() {
    let offset = time::UtcOffset::from_hms(1, 0, 30).unwrap();
    let when = OffsetDateTime::UNIX_EPOCH.to_offset(offset);
    let err = ScoreEntry::at(70, Duration::from_secs(60), None, when).unwrap_err();
    assert!(matches!(err, StoreError::Timestamp(_)));
    assert_eq!(err.error_code(), "E_STORE_TIMESTAMP");
}

#[test]
fn log_keys() {
    assert_eq!(ScoreLog::Essays.key(), "essays_results");
    assert_eq!(ScoreLog::Quizzes.key(), "quizzes_results");
}

// =============================================================================
// MemoryScoreStore
// =============================================================================

#[tokio::test]
async fn memory_store_appends_in_order_per_log() {
    let store = MemoryScoreStore::new();
    store.append(ScoreLog::Essays, entry(10)).await.unwrap();
    store.append(ScoreLog::Essays, entry(20)).await.unwrap();
    store.append(ScoreLog::Quizzes, entry(30)).await.unwrap();

    let essays = store.read(ScoreLog::Essays).await.unwrap();
    assert_eq!(essays.iter().map(|e| e.score).collect::<Vec<_>>(), vec![10, 20]);
    assert_eq!(store.read(ScoreLog::Quizzes).await.unwrap().len(), 1);
}

#[tokio::test]
async fn memory_store_unwritten_log_is_empty() {
    let store = MemoryScoreStore::new();
    assert!(store.read(ScoreLog::Quizzes).await.unwrap().is_empty());
}

// =============================================================================
// FileScoreStore
// =============================================================================

#[tokio::test]
async fn file_store_round_trips_through_disk() {
    let dir = temp_dir("roundtrip");
    let store = FileScoreStore::new(&dir);

    assert!(store.read(ScoreLog::Essays).await.unwrap().is_empty());
    store.append(ScoreLog::Essays, entry(85)).await.unwrap();
    store.append(ScoreLog::Essays, entry(90)).await.unwrap();

    let reopened = FileScoreStore::new(&dir);
    let essays = reopened.read(ScoreLog::Essays).await.unwrap();
    assert_eq!(essays, vec![entry(85), entry(90)]);
    assert!(dir.join("essays_results.json").exists());
    assert!(!dir.join("quizzes_results.json").exists());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn file_store_rejects_corrupt_log() {
    let dir = temp_dir("corrupt");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("quizzes_results.json"), "{ not an array").unwrap();

    let store = FileScoreStore::new(&dir);
    let err = store.append(ScoreLog::Quizzes, entry(50)).await.unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { key: "quizzes_results", .. }));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn file_store_reads_entries_written_by_other_clients() {
    let dir = temp_dir("foreign");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("quizzes_results.json"),
        r#"[{"score": 80, "subject": "Mars", "duration": 4, "timestamp": "2025-06-01T10:00:00.000Z"}]"#,
    )
    .unwrap();

    let store = FileScoreStore::new(&dir);
    let quizzes = store.read(ScoreLog::Quizzes).await.unwrap();
    assert_eq!(quizzes.len(), 1);
    assert_eq!(quizzes[0].subject.as_deref(), Some("Mars"));

    std::fs::remove_dir_all(&dir).unwrap();
}
