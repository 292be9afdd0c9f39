//! Core domain concepts shared across all subdomains.
//!
//! - [`participant::Participant`]: a registry record and the updates the core may apply
//! - [`actor::Actor`]: the caller behind a command and its role
//! - [`error::GameError`]: season-level rejections with reason codes

pub mod actor;
pub mod error;
pub mod participant;
