//! Domain error types
//!
//! Every rejection carries the phase it happened in and the offending input,
//! so an adapter can render a one-line explanation without re-reading state.

use crate::core::participant::ParticipantId;
use crate::season::phase::Phase;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable rejection category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    Unauthorized,
    InvalidPhaseTransition,
    InvalidTarget,
    DuplicateNomination,
    AlreadyActive,
    PowerAlreadyUsed,
    NoVotesCast,
    NotFound,
    CollaboratorUnavailable,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::Unauthorized => "unauthorized",
            ReasonCode::InvalidPhaseTransition => "invalid_phase_transition",
            ReasonCode::InvalidTarget => "invalid_target",
            ReasonCode::DuplicateNomination => "duplicate_nomination",
            ReasonCode::AlreadyActive => "already_active",
            ReasonCode::PowerAlreadyUsed => "power_already_used",
            ReasonCode::NoVotesCast => "no_votes_cast",
            ReasonCode::NotFound => "not_found",
            ReasonCode::CollaboratorUnavailable => "collaborator_unavailable",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Season-level rejection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("{actor} may not {input} during {phase}")]
    Unauthorized {
        phase: Phase,
        input: String,
        actor: ParticipantId,
    },

    #[error("cannot {input} during {phase}: {detail}")]
    InvalidPhaseTransition {
        phase: Phase,
        input: String,
        detail: String,
    },

    #[error("cannot {input} during {phase}: {target} {detail}")]
    InvalidTarget {
        phase: Phase,
        input: String,
        target: ParticipantId,
        detail: String,
    },

    #[error("{target} is already nominated ({phase})")]
    DuplicateNomination { phase: Phase, target: ParticipantId },

    #[error("a {kind} competition is already running ({phase})")]
    AlreadyActive { phase: Phase, kind: String },

    #[error("{participant} has already used their power this season ({phase})")]
    PowerAlreadyUsed {
        phase: Phase,
        participant: ParticipantId,
    },

    #[error("no votes cast for round {round} ({phase})")]
    NoVotesCast { phase: Phase, round: u32 },

    #[error("unknown {what} `{id}` ({phase})")]
    NotFound {
        phase: Phase,
        what: String,
        id: String,
    },

    #[error("{collaborator} unavailable during {input}: {message} ({phase})")]
    CollaboratorUnavailable {
        phase: Phase,
        input: String,
        collaborator: String,
        message: String,
    },
}

impl GameError {
    pub fn code(&self) -> ReasonCode {
        match self {
            GameError::Unauthorized { .. } => ReasonCode::Unauthorized,
            GameError::InvalidPhaseTransition { .. } => ReasonCode::InvalidPhaseTransition,
            GameError::InvalidTarget { .. } => ReasonCode::InvalidTarget,
            GameError::DuplicateNomination { .. } => ReasonCode::DuplicateNomination,
            GameError::AlreadyActive { .. } => ReasonCode::AlreadyActive,
            GameError::PowerAlreadyUsed { .. } => ReasonCode::PowerAlreadyUsed,
            GameError::NoVotesCast { .. } => ReasonCode::NoVotesCast,
            GameError::NotFound { .. } => ReasonCode::NotFound,
            GameError::CollaboratorUnavailable { .. } => ReasonCode::CollaboratorUnavailable,
        }
    }

    /// Phase the rejection happened in
    pub fn phase(&self) -> Phase {
        match self {
            GameError::Unauthorized { phase, .. }
            | GameError::InvalidPhaseTransition { phase, .. }
            | GameError::InvalidTarget { phase, .. }
            | GameError::DuplicateNomination { phase, .. }
            | GameError::AlreadyActive { phase, .. }
            | GameError::PowerAlreadyUsed { phase, .. }
            | GameError::NoVotesCast { phase, .. }
            | GameError::NotFound { phase, .. }
            | GameError::CollaboratorUnavailable { phase, .. } => *phase,
        }
    }

    /// Infrastructure failure rather than a rule rejection
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(self, GameError::CollaboratorUnavailable { .. })
    }

    pub(crate) fn phase_transition(
        phase: Phase,
        input: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        GameError::InvalidPhaseTransition {
            phase,
            input: input.into(),
            detail: detail.into(),
        }
    }

    pub(crate) fn invalid_target(
        phase: Phase,
        input: impl Into<String>,
        target: &ParticipantId,
        detail: impl Into<String>,
    ) -> Self {
        GameError::InvalidTarget {
            phase,
            input: input.into(),
            target: target.clone(),
            detail: detail.into(),
        }
    }

    pub(crate) fn unauthorized(phase: Phase, input: impl Into<String>, actor: &ParticipantId) -> Self {
        GameError::Unauthorized {
            phase,
            input: input.into(),
            actor: actor.clone(),
        }
    }
}
