//! Nomination set

use crate::core::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// Why a nominee could not be added
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NominationRejection {
    Full,
    Duplicate,
}

/// Ordered set of at most [`NominationSet::CAPACITY`] distinct nominees.
///
/// Order is nomination order, which is also the tie-break priority at tally time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NominationSet {
    ids: Vec<ParticipantId>,
}

impl NominationSet {
    pub const CAPACITY: usize = 2;

    pub fn new() -> Self {
        Self::default()
    }

    /// Append a nominee, returning the new size
    pub fn push(&mut self, id: ParticipantId) -> Result<usize, NominationRejection> {
        if self.contains(&id) {
            return Err(NominationRejection::Duplicate);
        }
        if self.is_full() {
            return Err(NominationRejection::Full);
        }
        self.ids.push(id);
        Ok(self.ids.len())
    }

    /// Remove a nominee; later nominees keep their relative order
    pub fn remove(&mut self, id: &ParticipantId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|n| n != id);
        self.ids.len() != before
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= Self::CAPACITY
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn as_slice(&self) -> &[ParticipantId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParticipantId> {
        self.ids.iter()
    }
}
