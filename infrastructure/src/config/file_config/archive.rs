//! Archive configuration from TOML (`[archive]` section)

use serde::{Deserialize, Serialize};

/// Raw archive configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileArchiveConfig {
    /// JSONL archive file; `None` keeps records in memory
    pub path: Option<String>,
}
