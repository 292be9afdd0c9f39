//! In-memory season archive.

use async_trait::async_trait;
use showrunner_application::ports::CollaboratorError;
use showrunner_application::ports::season_archive::SeasonArchive;
use showrunner_domain::SeasonRecord;
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemorySeasonArchive {
    records: Mutex<Vec<SeasonRecord>>,
}

impl InMemorySeasonArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<SeasonRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SeasonArchive for InMemorySeasonArchive {
    async fn record_season(&self, record: &SeasonRecord) -> Result<(), CollaboratorError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| CollaboratorError::Unavailable("archive lock poisoned".to_string()))?;
        if records.iter().any(|r| r.season_number == record.season_number) {
            return Err(CollaboratorError::Rejected(format!(
                "season {} is already archived",
                record.season_number
            )));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn latest_season_number(&self) -> Result<Option<u32>, CollaboratorError> {
        self.records
            .lock()
            .map(|r| r.iter().map(|r| r.season_number).max())
            .map_err(|_| CollaboratorError::Unavailable("archive lock poisoned".to_string()))
    }
}
