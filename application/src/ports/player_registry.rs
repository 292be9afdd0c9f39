//! Player registry port
//!
//! The registry owns participant identity. The season service reads records
//! through it and writes counters and flags back as atomic batches.

use super::CollaboratorError;
use async_trait::async_trait;
use showrunner_domain::{
    Counter, Flag, Participant, ParticipantId, ParticipantOrder, ParticipantUpdate,
};

/// Result of an upsert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub participant: Participant,
    /// `false` when the id was already registered
    pub created: bool,
}

#[async_trait]
pub trait PlayerRegistry: Send + Sync {
    async fn get_participant(
        &self,
        id: &ParticipantId,
    ) -> Result<Option<Participant>, CollaboratorError>;

    /// Create the record, or refresh the display name of an existing one.
    /// Counters and flags of an existing record are left alone.
    async fn upsert_participant(
        &self,
        id: &ParticipantId,
        display_name: &str,
    ) -> Result<Registration, CollaboratorError>;

    async fn list_participants(
        &self,
        order: ParticipantOrder,
    ) -> Result<Vec<Participant>, CollaboratorError>;

    /// Apply every update or none of them.
    ///
    /// Counter updates are increments applied against the stored value, never
    /// a read-then-write from the caller's copy.
    async fn apply(&self, updates: &[ParticipantUpdate]) -> Result<(), CollaboratorError>;

    async fn increment_counter(
        &self,
        id: &ParticipantId,
        counter: Counter,
        delta: i64,
    ) -> Result<(), CollaboratorError> {
        self.apply(&[ParticipantUpdate::increment(id, counter, delta)])
            .await
    }

    async fn set_flag(
        &self,
        id: &ParticipantId,
        flag: Flag,
        value: bool,
    ) -> Result<(), CollaboratorError> {
        self.apply(&[ParticipantUpdate::set_flag(id, flag, value)])
            .await
    }
}
