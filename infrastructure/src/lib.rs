//! Infrastructure layer for showrunner
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod archive;
pub mod config;
pub mod registry;

// Re-export commonly used types
pub use archive::{InMemorySeasonArchive, JsonlSeasonArchive};
pub use config::{
    ConfigLoader, FileArchiveConfig, FileCompetitionConfig, FileConfig, FileSeasonConfig,
};
pub use registry::InMemoryPlayerRegistry;
