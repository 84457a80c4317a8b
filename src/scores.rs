//! Score log: append-only history of essay and quiz results.
//!
//! DESIGN
//! ======
//! Two independently keyed JSON arrays, `essays_results` and
//! `quizzes_results`. Tools only ever append; `read` exists for the CLI
//! history view and for tests. Storage is injected through [`ScoreStore`]:
//! [`FileScoreStore`] keeps one `<key>.json` file per log,
//! [`MemoryScoreStore`] backs tests. No eviction, no size cap, no schema
//! version.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;

use crate::error::ErrorCode;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("score log io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("score log {key} is corrupt: {reason}")]
    Corrupt { key: &'static str, reason: String },

    #[error("score entry serialize failed: {0}")]
    Serialize(String),

    #[error("score timestamp format failed: {0}")]
    Timestamp(String),
}

impl ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "E_STORE_IO",
            Self::Corrupt { .. } => "E_STORE_CORRUPT",
            Self::Serialize(_) => "E_STORE_SERIALIZE",
            Self::Timestamp(_) => "E_STORE_TIMESTAMP",
        }
    }
}

/// Which persisted list an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreLog {
    Essays,
    Quizzes,
}

impl ScoreLog {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Essays => "essays_results",
            Self::Quizzes => "quizzes_results",
        }
    }
}

/// One persisted result. `subject` is present on quiz entries only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Whole minutes, rounded.
    pub duration: u32,
    /// RFC 3339 UTC timestamp.
    pub timestamp: String,
}

impl ScoreEntry {
    /// Entry stamped with the current UTC time.
    ///
    /// # Errors
    ///
    /// [`StoreError::Timestamp`] if the time cannot be rendered as RFC 3339.
    pub fn now(score: u32, elapsed: Duration, subject: Option<String>) -> Result<Self, StoreError> {
        Self::at(score, elapsed, subject, OffsetDateTime::now_utc())
    }

    /// Entry stamped with `when`.
    ///
    /// # Errors
    ///
    /// [`StoreError::Timestamp`] if `when` has no RFC 3339 rendering.
    pub fn at(
        score: u32,
        elapsed: Duration,
        subject: Option<String>,
        when: OffsetDateTime,
    ) -> Result<Self, StoreError> {
        let timestamp = when.format(&Rfc3339).map_err(|e| StoreError::Timestamp(e.to_string()))?;
        Ok(Self { score, subject, duration: duration_minutes(elapsed), timestamp })
    }
}

/// Elapsed time rounded to the nearest whole minute.
#[must_use]
pub fn duration_minutes(elapsed: Duration) -> u32 {
    let minutes = (elapsed.as_millis() + 30_000) / 60_000;
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

// =============================================================================
// STORE TRAIT
// =============================================================================

#[async_trait::async_trait]
pub trait ScoreStore: Send + Sync {
    /// All entries of `log`, oldest first. A log never written is empty.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing storage cannot be read.
    async fn read(&self, log: ScoreLog) -> Result<Vec<ScoreEntry>, StoreError>;

    /// Append one entry to `log`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing storage cannot be updated.
    async fn append(&self, log: ScoreLog, entry: ScoreEntry) -> Result<(), StoreError>;
}

// =============================================================================
// MEMORY STORE
// =============================================================================

#[derive(Default)]
pub struct MemoryScoreStore {
    logs: Mutex<HashMap<ScoreLog, Vec<ScoreEntry>>>,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ScoreStore for MemoryScoreStore {
    async fn read(&self, log: ScoreLog) -> Result<Vec<ScoreEntry>, StoreError> {
        let logs = self.logs.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(logs.get(&log).cloned().unwrap_or_default())
    }

    async fn append(&self, log: ScoreLog, entry: ScoreEntry) -> Result<(), StoreError> {
        let mut logs = self.logs.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        logs.entry(log).or_default().push(entry);
        Ok(())
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// One pretty-printed JSON array per log under `dir`.
///
/// Appends are read-modify-write, serialized by an in-process lock and
/// finished with a rename so a crash never leaves a half-written file.
pub struct FileScoreStore {
    dir: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl FileScoreStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), write_lock: tokio::sync::Mutex::new(()) }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, log: ScoreLog) -> PathBuf {
        self.dir.join(format!("{}.json", log.key()))
    }

    async fn load(&self, log: ScoreLog) -> Result<Vec<ScoreEntry>, StoreError> {
        let raw = match tokio::fs::read_to_string(self.path_for(log)).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt { key: log.key(), reason: e.to_string() })
    }
}

#[async_trait::async_trait]
impl ScoreStore for FileScoreStore {
    async fn read(&self, log: ScoreLog) -> Result<Vec<ScoreEntry>, StoreError> {
        self.load(log).await
    }

    async fn append(&self, log: ScoreLog, entry: ScoreEntry) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load(log).await?;
        entries.push(entry);
        let json = serde_json::to_string_pretty(&entries).map_err(|e| StoreError::Serialize(e.to_string()))?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(log);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!(key = log.key(), len = entries.len(), "scores: appended");
        Ok(())
    }
}

#[cfg(test)]
#[path = "scores_test.rs"]
mod tests;
