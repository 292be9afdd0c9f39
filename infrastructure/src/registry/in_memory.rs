//! In-memory player registry.
//!
//! Records live in a `HashMap` behind a `std::sync::Mutex`. A batch is
//! validated against the map before any record changes, so `apply` is
//! all-or-nothing.

use async_trait::async_trait;
use showrunner_application::ports::CollaboratorError;
use showrunner_application::ports::player_registry::{PlayerRegistry, Registration};
use showrunner_domain::{Participant, ParticipantId, ParticipantOrder, ParticipantUpdate};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

#[derive(Default)]
pub struct InMemoryPlayerRegistry {
    participants: Mutex<HashMap<ParticipantId, Participant>>,
}

impl InMemoryPlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.participants.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<ParticipantId, Participant>>, CollaboratorError>
    {
        self.participants
            .lock()
            .map_err(|_| CollaboratorError::Unavailable("registry lock poisoned".to_string()))
    }
}

#[async_trait]
impl PlayerRegistry for InMemoryPlayerRegistry {
    async fn get_participant(
        &self,
        id: &ParticipantId,
    ) -> Result<Option<Participant>, CollaboratorError> {
        Ok(self.lock()?.get(id).cloned())
    }

    async fn upsert_participant(
        &self,
        id: &ParticipantId,
        display_name: &str,
    ) -> Result<Registration, CollaboratorError> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(CollaboratorError::Rejected(
                "display name cannot be empty".to_string(),
            ));
        }

        let mut participants = self.lock()?;
        let created = !participants.contains_key(id);
        let participant = participants
            .entry(id.clone())
            .or_insert_with(|| Participant::new(id.clone(), display_name));
        participant.display_name = display_name.to_string();

        Ok(Registration {
            participant: participant.clone(),
            created,
        })
    }

    async fn list_participants(
        &self,
        order: ParticipantOrder,
    ) -> Result<Vec<Participant>, CollaboratorError> {
        let mut list: Vec<Participant> = self.lock()?.values().cloned().collect();
        order.sort(&mut list);
        Ok(list)
    }

    async fn apply(&self, updates: &[ParticipantUpdate]) -> Result<(), CollaboratorError> {
        let mut participants = self.lock()?;

        if let Some(missing) = updates
            .iter()
            .map(|u| u.participant_id())
            .find(|id| !participants.contains_key(*id))
        {
            return Err(CollaboratorError::Rejected(format!(
                "unknown participant `{}`",
                missing
            )));
        }

        for update in updates {
            if let Some(participant) = participants.get_mut(update.participant_id()) {
                update.apply_to(participant);
            }
        }
        debug!(updates = updates.len(), "Applied registry batch");
        Ok(())
    }
}
