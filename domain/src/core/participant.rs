//! Participant records as the core sees them.
//!
//! The registry owns identity (`id`, `display_name`); the core only reads and
//! writes [`Counters`] and [`Flags`], always through [`ParticipantUpdate`].

use serde::{Deserialize, Serialize};

/// Opaque, unique participant identifier (e.g. a chat user id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Numeric per-participant counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Counter {
    /// Head-of-round wins
    RoundWins,
    /// Veto competition wins
    VetoWins,
    /// Competition points
    Points,
}

impl Counter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Counter::RoundWins => "round_wins",
            Counter::VetoWins => "veto_wins",
            Counter::Points => "points",
        }
    }
}

impl std::fmt::Display for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Boolean per-participant flags, reset at the start of every season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    Eliminated,
    InJury,
    PowerConsumed,
}

impl Flag {
    pub const ALL: [Flag; 3] = [Flag::Eliminated, Flag::InJury, Flag::PowerConsumed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Flag::Eliminated => "eliminated",
            Flag::InJury => "in_jury",
            Flag::PowerConsumed => "power_consumed",
        }
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Counters {
    pub round_wins: i64,
    pub veto_wins: i64,
    pub points: i64,
}

impl Counters {
    pub fn get(&self, counter: Counter) -> i64 {
        match counter {
            Counter::RoundWins => self.round_wins,
            Counter::VetoWins => self.veto_wins,
            Counter::Points => self.points,
        }
    }

    fn slot(&mut self, counter: Counter) -> &mut i64 {
        match counter {
            Counter::RoundWins => &mut self.round_wins,
            Counter::VetoWins => &mut self.veto_wins,
            Counter::Points => &mut self.points,
        }
    }

    pub fn increment(&mut self, counter: Counter, delta: i64) {
        let slot = self.slot(counter);
        *slot = slot.saturating_add(delta);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flags {
    pub eliminated: bool,
    pub in_jury: bool,
    pub power_consumed: bool,
}

impl Flags {
    pub fn get(&self, flag: Flag) -> bool {
        match flag {
            Flag::Eliminated => self.eliminated,
            Flag::InJury => self.in_jury,
            Flag::PowerConsumed => self.power_consumed,
        }
    }

    pub fn set(&mut self, flag: Flag, value: bool) {
        match flag {
            Flag::Eliminated => self.eliminated = value,
            Flag::InJury => self.in_jury = value,
            Flag::PowerConsumed => self.power_consumed = value,
        }
    }
}

/// A participant record (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: String,
    #[serde(default)]
    pub counters: Counters,
    #[serde(default)]
    pub flags: Flags,
}

impl Participant {
    pub fn new(id: impl Into<ParticipantId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            counters: Counters::default(),
            flags: Flags::default(),
        }
    }
}

/// Sort order for registry listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantOrder {
    /// Points descending (scoreboard order)
    #[default]
    Points,
    /// Round wins descending
    RoundWins,
    /// Display name ascending
    Name,
}

impl ParticipantOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantOrder::Points => "points",
            ParticipantOrder::RoundWins => "round_wins",
            ParticipantOrder::Name => "name",
        }
    }

    /// Sort participants in place. Ties fall back to display name, then id,
    /// so every listing is deterministic.
    pub fn sort(&self, participants: &mut [Participant]) {
        participants.sort_by(|a, b| {
            let primary = match self {
                ParticipantOrder::Points => b.counters.points.cmp(&a.counters.points),
                ParticipantOrder::RoundWins => b.counters.round_wins.cmp(&a.counters.round_wins),
                ParticipantOrder::Name => std::cmp::Ordering::Equal,
            };
            primary
                .then_with(|| a.display_name.cmp(&b.display_name))
                .then_with(|| a.id.cmp(&b.id))
        });
    }
}

/// A single registry mutation requested by the core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ParticipantUpdate {
    IncrementCounter {
        id: ParticipantId,
        counter: Counter,
        delta: i64,
    },
    SetFlag {
        id: ParticipantId,
        flag: Flag,
        value: bool,
    },
}

impl ParticipantUpdate {
    pub fn increment(id: &ParticipantId, counter: Counter, delta: i64) -> Self {
        ParticipantUpdate::IncrementCounter {
            id: id.clone(),
            counter,
            delta,
        }
    }

    pub fn set_flag(id: &ParticipantId, flag: Flag, value: bool) -> Self {
        ParticipantUpdate::SetFlag {
            id: id.clone(),
            flag,
            value,
        }
    }

    pub fn participant_id(&self) -> &ParticipantId {
        match self {
            ParticipantUpdate::IncrementCounter { id, .. } => id,
            ParticipantUpdate::SetFlag { id, .. } => id,
        }
    }

    /// Apply this update to a record. The caller must have matched the id.
    pub fn apply_to(&self, participant: &mut Participant) {
        match self {
            ParticipantUpdate::IncrementCounter { counter, delta, .. } => {
                participant.counters.increment(*counter, *delta)
            }
            ParticipantUpdate::SetFlag { flag, value, .. } => participant.flags.set(*flag, *value),
        }
    }
}
