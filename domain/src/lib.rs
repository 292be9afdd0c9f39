//! Domain layer for showrunner
//!
//! This crate contains the season rules: phases, nominations, votes and timed
//! competitions. It performs no I/O; every accepted input returns a
//! [`Transition`] describing the registry updates, archive record and
//! announcements the application layer carries out.
//!
//! # Core Concepts
//!
//! ## Season
//!
//! A [`Season`] walks through rounds:
//!
//! - **Round competition**: an operator names the head of round (the authority)
//! - **Nomination / Veto**: the authority names two nominees; the veto may save one
//! - **Voting / Eviction**: players vote, the tally evicts one nominee into the jury
//! - **Finale**: jurors vote among the finalists and the winner is archived
//!
//! ## Votes
//!
//! The [`VoteLedger`] keeps one live vote per voter per round, plus the
//! once-per-season secret power that revokes a vote. [`VoteTally`] counts
//! ballots and breaks ties by priority order.

pub mod competition;
pub mod core;
pub mod season;
pub mod vote;

// Re-export commonly used types
pub use competition::{
    AnswerOutcome, CompetitionHandle, CompetitionKind, CompetitionResult, CompetitionScore,
    CompetitionSession, CompetitionSpec, ResolutionCause,
};
pub use core::{
    actor::{Actor, Role},
    error::{GameError, ReasonCode},
    participant::{
        Counter, Counters, Flag, Flags, Participant, ParticipantId, ParticipantOrder,
        ParticipantUpdate,
    },
};
pub use season::{
    ActiveCompetition, Announcement, Outcome, Phase, Season, SeasonRecord, SeasonRules,
    SeasonSnapshot, Transition,
};
pub use vote::{TallyEntry, TallyResult, Vote, VoteLedger, VoteTally};
