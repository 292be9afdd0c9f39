//! Configuration file loading for showrunner
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./showrunner.toml` or `./.showrunner.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/showrunner/config.toml`
//! 4. Fallback: `~/.config/showrunner/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{FileArchiveConfig, FileCompetitionConfig, FileConfig, FileSeasonConfig};
pub use loader::ConfigLoader;
