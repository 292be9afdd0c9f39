//! JSONL file archive for finished seasons.
//!
//! Each [`SeasonRecord`] is serialized as a single JSON line and appended to
//! the file via a buffered writer. Existing lines are read once at open time
//! so season numbering survives restarts.

use async_trait::async_trait;
use showrunner_application::ports::CollaboratorError;
use showrunner_application::ports::season_archive::SeasonArchive;
use showrunner_domain::SeasonRecord;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};

struct ArchiveState {
    writer: BufWriter<File>,
    latest: Option<u32>,
}

/// Append-only season archive.
///
/// Thread-safe via `Mutex`. Flushes after every record and on `Drop`.
pub struct JsonlSeasonArchive {
    state: Mutex<ArchiveState>,
    path: PathBuf,
}

impl JsonlSeasonArchive {
    /// Open (or create) the archive at `path`.
    ///
    /// Creates parent directories if they don't exist. Malformed lines in an
    /// existing file are skipped with a warning.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let latest = if path.exists() {
            Self::scan_latest(path)?
        } else {
            None
        };

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        info!(
            "Season archive at {} (latest season: {:?})",
            path.display(),
            latest
        );

        Ok(Self {
            state: Mutex::new(ArchiveState {
                writer: BufWriter::new(file),
                latest,
            }),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the archive file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every archived record, skipping malformed lines.
    pub fn records(&self) -> std::io::Result<Vec<SeasonRecord>> {
        if let Ok(mut state) = self.state.lock() {
            state.writer.flush()?;
        }
        Self::read_records(&self.path)
    }

    fn read_records(path: &Path) -> std::io::Result<Vec<SeasonRecord>> {
        let reader = BufReader::new(File::open(path)?);
        let mut records = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<SeasonRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(
                    "Skipping malformed archive line {} in {}: {}",
                    index + 1,
                    path.display(),
                    e
                ),
            }
        }
        Ok(records)
    }

    fn scan_latest(path: &Path) -> std::io::Result<Option<u32>> {
        Ok(Self::read_records(path)?
            .iter()
            .map(|r| r.season_number)
            .max())
    }
}

#[async_trait]
impl SeasonArchive for JsonlSeasonArchive {
    async fn record_season(&self, record: &SeasonRecord) -> Result<(), CollaboratorError> {
        let line = serde_json::to_string(record)
            .map_err(|e| CollaboratorError::Other(format!("serialize season record: {}", e)))?;

        let mut state = self
            .state
            .lock()
            .map_err(|_| CollaboratorError::Unavailable("archive lock poisoned".to_string()))?;

        if state.latest.is_some_and(|n| record.season_number <= n) {
            return Err(CollaboratorError::Rejected(format!(
                "season {} is already archived",
                record.season_number
            )));
        }

        writeln!(state.writer, "{}", line)
            .and_then(|_| state.writer.flush())
            .map_err(|e| {
                CollaboratorError::Unavailable(format!("write {}: {}", self.path.display(), e))
            })?;
        state.latest = Some(record.season_number);
        Ok(())
    }

    async fn latest_season_number(&self) -> Result<Option<u32>, CollaboratorError> {
        self.state
            .lock()
            .map(|state| state.latest)
            .map_err(|_| CollaboratorError::Unavailable("archive lock poisoned".to_string()))
    }
}

impl Drop for JsonlSeasonArchive {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            let _ = state.writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use showrunner_domain::ParticipantId;
    use std::io::Read;

    fn record(n: u32, winner: &str) -> SeasonRecord {
        SeasonRecord::new(
            n,
            ParticipantId::new(winner),
            Utc.with_ymd_and_hms(2026, 5, n, 20, 0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_writes_one_json_line_per_season() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seasons.jsonl");
        let archive = JsonlSeasonArchive::open(&path).unwrap();

        archive.record_season(&record(1, "alice")).await.unwrap();
        archive.record_season(&record(2, "bob")).await.unwrap();
        drop(archive);

        let mut content = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        let lines: Vec<&str> = content.trim().lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["season_number"], 1);
        assert_eq!(first["winner"], "alice");
        assert!(first["timestamp"].as_str().unwrap().starts_with("2026-05-01"));
    }

    #[tokio::test]
    async fn test_reopen_resumes_numbering() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("seasons.jsonl");

        let archive = JsonlSeasonArchive::open(&path).unwrap();
        assert_eq!(archive.latest_season_number().await.unwrap(), None);
        archive.record_season(&record(3, "alice")).await.unwrap();
        drop(archive);

        let archive = JsonlSeasonArchive::open(&path).unwrap();
        assert_eq!(archive.latest_season_number().await.unwrap(), Some(3));
        assert_eq!(archive.records().unwrap(), vec![record(3, "alice")]);
    }

    #[tokio::test]
    async fn test_archived_season_is_immutable() {
        let dir = tempfile::tempdir().unwrap();
        let archive = JsonlSeasonArchive::open(dir.path().join("seasons.jsonl")).unwrap();
        archive.record_season(&record(1, "alice")).await.unwrap();

        let err = archive.record_season(&record(1, "mallory")).await.unwrap_err();
        assert!(matches!(err, CollaboratorError::Rejected(_)));
        assert_eq!(archive.records().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seasons.jsonl");
        let good = serde_json::to_string(&record(4, "carol")).unwrap();
        std::fs::write(&path, format!("not json\n{}\n\n", good)).unwrap();

        let archive = JsonlSeasonArchive::open(&path).unwrap();
        assert_eq!(archive.latest_season_number().await.unwrap(), Some(4));
    }
}
