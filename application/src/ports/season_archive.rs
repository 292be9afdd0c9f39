//! Season archive port

use super::CollaboratorError;
use async_trait::async_trait;
use showrunner_domain::SeasonRecord;

#[async_trait]
pub trait SeasonArchive: Send + Sync {
    /// Persist a finished season. Records are immutable once written.
    async fn record_season(&self, record: &SeasonRecord) -> Result<(), CollaboratorError>;

    /// Highest archived season number, if any season was archived
    async fn latest_season_number(&self) -> Result<Option<u32>, CollaboratorError>;
}
