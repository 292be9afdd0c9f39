//! Timed mini-competitions.

pub mod session;

pub use session::{
    AnswerOutcome, CompetitionHandle, CompetitionKind, CompetitionResult, CompetitionScore,
    CompetitionSession, CompetitionSpec, ResolutionCause, answers_match,
};
