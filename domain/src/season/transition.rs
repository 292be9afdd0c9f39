//! What a committed transition produced.
//!
//! The state machine never talks to collaborators. Each accepted input yields a
//! [`Transition`]: the caller-facing [`Outcome`] plus the registry updates,
//! archive record and announcements the application layer must carry out.

use super::phase::Phase;
use super::record::SeasonRecord;
use super::snapshot::SeasonSnapshot;
use crate::competition::{AnswerOutcome, CompetitionHandle, CompetitionKind, CompetitionResult};
use crate::core::participant::{Participant, ParticipantId, ParticipantUpdate};
use crate::vote::{TallyResult, Vote};
use serde::Serialize;

/// Result of an accepted command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Registered {
        participant: ParticipantId,
        created: bool,
    },
    SeasonStarted {
        season_number: u32,
        round: u32,
        participants: usize,
    },
    RoundWinnerAssigned {
        participant: ParticipantId,
        round: u32,
    },
    VetoWinnerAssigned {
        participant: ParticipantId,
        round: u32,
    },
    Nominated {
        target: ParticipantId,
        nominees: Vec<ParticipantId>,
        phase: Phase,
    },
    VetoUsed {
        removed: ParticipantId,
        nominees: Vec<ParticipantId>,
    },
    DoubleEvictionScheduled {
        round: u32,
    },
    VotingOpened {
        round: u32,
        nominees: Vec<ParticipantId>,
    },
    VoteRecorded {
        voter: ParticipantId,
        target: ParticipantId,
        round: u32,
        replaced: bool,
    },
    Evicted {
        evicted: ParticipantId,
        tally: TallyResult,
        round: u32,
        next_round: u32,
        next_phase: Phase,
    },
    CompetitionStarted {
        handle: CompetitionHandle,
        kind: CompetitionKind,
        duration_secs: u64,
    },
    AnswerRecorded {
        participant: ParticipantId,
        result: AnswerOutcome,
    },
    CompetitionResolved {
        result: CompetitionResult,
    },
    PowerUsed {
        revoked: Vote,
    },
    FinaleDeclared {
        finalists: Vec<ParticipantId>,
        jury: Vec<ParticipantId>,
    },
    WinnerRevealed {
        record: SeasonRecord,
        tally: Option<TallyResult>,
    },
    Scoreboard {
        snapshot: SeasonSnapshot,
        participants: Vec<Participant>,
    },
}

/// Text for the announcer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub text: String,
    /// Delivered after the configured reveal pause
    pub dramatic: bool,
}

impl Announcement {
    pub fn now(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            dramatic: false,
        }
    }

    pub fn dramatic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            dramatic: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub outcome: Outcome,
    /// Applied to the registry as one atomic batch
    pub updates: Vec<ParticipantUpdate>,
    pub archive: Option<SeasonRecord>,
    pub announcements: Vec<Announcement>,
}

impl Transition {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            updates: Vec::new(),
            archive: None,
            announcements: Vec::new(),
        }
    }

    pub fn with_update(mut self, update: ParticipantUpdate) -> Self {
        self.updates.push(update);
        self
    }

    pub fn with_updates(mut self, updates: impl IntoIterator<Item = ParticipantUpdate>) -> Self {
        self.updates.extend(updates);
        self
    }

    pub fn with_archive(mut self, record: SeasonRecord) -> Self {
        self.archive = Some(record);
        self
    }

    pub fn announce(mut self, text: impl Into<String>) -> Self {
        self.announcements.push(Announcement::now(text));
        self
    }

    pub fn announce_dramatic(mut self, text: impl Into<String>) -> Self {
        self.announcements.push(Announcement::dramatic(text));
        self
    }
}
