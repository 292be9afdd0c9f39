//! The caller behind a command.

use super::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// Role of a caller. Basic membership is checked by the command adapter;
/// the operator role is checked by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Production staff running the season
    Operator,
    /// Anyone else
    Player,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ParticipantId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<ParticipantId>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    pub fn operator(id: impl Into<ParticipantId>) -> Self {
        Self::new(id, Role::Operator)
    }

    pub fn player(id: impl Into<ParticipantId>) -> Self {
        Self::new(id, Role::Player)
    }

    pub fn is_operator(&self) -> bool {
        self.role == Role::Operator
    }
}
