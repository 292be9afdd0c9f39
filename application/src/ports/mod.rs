//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement. The season service only ever talks to collaborators
//! through these traits.

pub mod announcer;
pub mod player_registry;
pub mod season_archive;

use thiserror::Error;

/// Failure reported by any collaborator adapter
///
/// The service never retries; it maps these into
/// `GameError::CollaboratorUnavailable` and hands them back to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("Unavailable: {0}")]
    Unavailable(String),

    #[error("Rejected: {0}")]
    Rejected(String),

    #[error("Other error: {0}")]
    Other(String),
}
