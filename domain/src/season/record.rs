//! Archived season outcome

use crate::core::participant::ParticipantId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable record of a finished season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonRecord {
    pub season_number: u32,
    pub winner: ParticipantId,
    pub timestamp: DateTime<Utc>,
}

impl SeasonRecord {
    pub fn new(season_number: u32, winner: ParticipantId, timestamp: DateTime<Utc>) -> Self {
        Self {
            season_number,
            winner,
            timestamp,
        }
    }
}
