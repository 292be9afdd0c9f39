//! Season phases

use serde::{Deserialize, Serialize};

/// Phase of a season
///
/// ```text
/// IDLE → ROUND_COMPETITION → NOMINATION ⇄ VETO → VOTING → EVICTION
///            ↑                   ↑                            │
///            └───────────────────┴──── (next round / double) ─┤
///                                                             ↓
///                                   SEASON_END ← FINALE ← JURY
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// No season running
    #[default]
    Idle,
    /// Head-of-round competition is being played
    RoundCompetition,
    /// Round authority is picking nominees
    Nomination,
    /// Two nominees locked; veto may be used
    Veto,
    /// Ballots open for the current round
    Voting,
    /// Transient: an eviction is being applied
    Eviction,
    /// Finalists reached; waiting for the finale
    Jury,
    /// Jury votes for the winner
    Finale,
    /// Winner archived
    SeasonEnd,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "IDLE",
            Phase::RoundCompetition => "ROUND_COMPETITION",
            Phase::Nomination => "NOMINATION",
            Phase::Veto => "VETO",
            Phase::Voting => "VOTING",
            Phase::Eviction => "EVICTION",
            Phase::Jury => "JURY",
            Phase::Finale => "FINALE",
            Phase::SeasonEnd => "SEASON_END",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::RoundCompetition => "Round Competition",
            Phase::Nomination => "Nominations",
            Phase::Veto => "Veto",
            Phase::Voting => "Voting",
            Phase::Eviction => "Eviction",
            Phase::Jury => "Jury",
            Phase::Finale => "Finale",
            Phase::SeasonEnd => "Season End",
        }
    }

    /// A season is running and has not reached the finale yet
    pub fn is_pre_finale(&self) -> bool {
        !matches!(
            self,
            Phase::Idle | Phase::Finale | Phase::SeasonEnd
        )
    }

    /// No season is running; `start_season` is accepted
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Idle | Phase::SeasonEnd)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
