//! Competition configuration from TOML (`[competitions.<kind>]` tables)

use serde::{Deserialize, Serialize};
use showrunner_application::CompetitionConfig;
use std::time::Duration;

/// Raw configuration of one competition kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCompetitionConfig {
    pub answer: String,
    pub duration_secs: u64,
    pub points: i64,
}

impl Default for FileCompetitionConfig {
    fn default() -> Self {
        Self {
            answer: String::new(),
            duration_secs: 60,
            points: 1,
        }
    }
}

impl FileCompetitionConfig {
    pub fn to_competition_config(&self) -> CompetitionConfig {
        CompetitionConfig::new(self.answer.trim(), Duration::from_secs(self.duration_secs))
            .with_points(self.points)
    }
}
