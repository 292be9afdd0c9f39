//! Application-level configuration.
//!
//! - [`SeasonConfig`]: operator roster, season rules, reveal pacing
//! - [`CompetitionConfig`]: answer, duration and points per competition kind
//! - [`ConfigIssue`]: validation findings reported by config loaders

pub mod season_config;
pub mod validation;

pub use season_config::{CompetitionConfig, SeasonConfig};
pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
