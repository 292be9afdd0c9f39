//! Application layer for showrunner
//!
//! This crate contains the season use case, port definitions, the command
//! intent model, and application configuration. It depends only on the
//! domain layer.

pub mod command;
pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use command::Intent;
pub use config::{CompetitionConfig, ConfigIssue, ConfigIssueCode, SeasonConfig, Severity};
pub use ports::{
    CollaboratorError,
    announcer::Announcer,
    player_registry::{PlayerRegistry, Registration},
    season_archive::SeasonArchive,
};
pub use use_cases::run_season::SeasonService;
