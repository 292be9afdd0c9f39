//! Season configuration from TOML (`[season]` section)

use serde::{Deserialize, Serialize};

/// Raw season configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSeasonConfig {
    /// Actor ids holding the operator role
    pub operators: Vec<String>,
    /// Remaining players at or below which the jury phase begins
    pub finalists: usize,
    /// Dramatic pause before eviction and winner announcements
    pub reveal_delay_ms: u64,
}

impl Default for FileSeasonConfig {
    fn default() -> Self {
        Self {
            operators: Vec::new(),
            finalists: 3,
            reveal_delay_ms: 3000,
        }
    }
}
