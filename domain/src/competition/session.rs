//! Timed mini-competition scoring
//!
//! A [`CompetitionSession`] only scores; it has no clock of its own. Callers
//! pass the current [`Instant`] so the same rules run under a real or a paused
//! test clock. Deadline scheduling lives in the application layer.

use crate::core::participant::ParticipantId;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Competition kind (e.g. "trivia"), normalized to lowercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompetitionKind(String);

impl CompetitionKind {
    pub fn new(kind: impl AsRef<str>) -> Self {
        Self(kind.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CompetitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CompetitionKind {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Everything needed to run one competition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetitionSpec {
    pub kind: CompetitionKind,
    pub answer: String,
    pub duration: Duration,
    /// Score for a correct answer; also the points awarded to the winner
    pub points: i64,
}

impl CompetitionSpec {
    pub fn new(kind: impl AsRef<str>, answer: impl Into<String>, duration: Duration) -> Self {
        Self {
            kind: CompetitionKind::new(kind),
            answer: answer.into(),
            duration,
            points: 1,
        }
    }

    pub fn with_points(mut self, points: i64) -> Self {
        self.points = points;
        self
    }
}

/// Identifies one session; a stale handle never matches a newer session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompetitionHandle(u64);

impl CompetitionHandle {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CompetitionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result of a single submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOutcome {
    /// First correct answer from this participant
    Correct,
    Incorrect,
    /// Participant already scored; submission ignored
    AlreadyScored,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionCause {
    Deadline,
    Cancelled,
}

/// A participant's qualifying answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionScore {
    pub participant: ParticipantId,
    pub score: i64,
    /// Time from session start to the qualifying answer
    pub elapsed: Duration,
}

/// Final standings of a resolved session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionResult {
    pub handle: CompetitionHandle,
    pub kind: CompetitionKind,
    pub winner: Option<ParticipantId>,
    pub points: i64,
    pub cause: ResolutionCause,
    /// Ranked: highest score first, then earliest answer
    pub standings: Vec<CompetitionScore>,
}

/// Case-insensitive, whitespace-trimmed exact match
pub fn answers_match(expected: &str, given: &str) -> bool {
    expected.trim().to_lowercase() == given.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetitionSession {
    handle: CompetitionHandle,
    spec: CompetitionSpec,
    started_at: Instant,
    deadline: Instant,
    scores: Vec<CompetitionScore>,
}

impl CompetitionSession {
    pub fn new(handle: CompetitionHandle, spec: CompetitionSpec, now: Instant) -> Self {
        let deadline = now + spec.duration;
        Self {
            handle,
            spec,
            started_at: now,
            deadline,
            scores: Vec::new(),
        }
    }

    pub fn handle(&self) -> CompetitionHandle {
        self.handle
    }

    pub fn kind(&self) -> &CompetitionKind {
        &self.spec.kind
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Still accepting answers at `now`
    pub fn is_open(&self, now: Instant) -> bool {
        now < self.deadline
    }

    pub fn has_scored(&self, participant: &ParticipantId) -> bool {
        self.scores.iter().any(|s| &s.participant == participant)
    }

    /// Check an answer. Only the first correct answer per participant counts.
    pub fn submit(&mut self, participant: &ParticipantId, answer: &str, now: Instant) -> AnswerOutcome {
        if self.has_scored(participant) {
            return AnswerOutcome::AlreadyScored;
        }
        if !answers_match(&self.spec.answer, answer) {
            return AnswerOutcome::Incorrect;
        }
        self.scores.push(CompetitionScore {
            participant: participant.clone(),
            score: self.spec.points,
            elapsed: now.saturating_duration_since(self.started_at),
        });
        AnswerOutcome::Correct
    }

    /// Ranked standings: highest score, then earliest qualifying answer
    pub fn standings(&self) -> Vec<CompetitionScore> {
        let mut standings = self.scores.clone();
        // Stable sort keeps submission order for exact ties
        standings.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.elapsed.cmp(&b.elapsed)));
        standings
    }

    /// Consume the session into its final result
    pub fn resolve(self, cause: ResolutionCause) -> CompetitionResult {
        let standings = self.standings();
        CompetitionResult {
            handle: self.handle,
            kind: self.spec.kind,
            winner: standings.first().map(|s| s.participant.clone()),
            points: self.spec.points,
            cause,
            standings,
        }
    }
}
