//! Command intents accepted by the season service.
//!
//! The command adapter resolves who is speaking (an [`Actor`](showrunner_domain::Actor))
//! and what they asked for (an [`Intent`]). Operator-only intents are checked
//! uniformly before any phase logic runs.

use showrunner_domain::{CompetitionKind, ParticipantId, ParticipantOrder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Register the caller; defaults the display name to the caller id
    Register { display_name: Option<String> },
    StartSeason,
    AssignRoundWinner(ParticipantId),
    AssignVetoWinner(ParticipantId),
    Nominate(ParticipantId),
    UseVeto(ParticipantId),
    ScheduleDoubleEviction,
    StartVoting,
    /// The caller votes for the target
    CastVote(ParticipantId),
    EndVoting,
    StartCompetition(CompetitionKind),
    /// The caller answers the running competition
    SubmitAnswer(String),
    EndCompetition,
    /// The caller revokes their own live vote
    UseSecretPower,
    DeclareFinale,
    RevealWinner,
    /// Standings in the given order
    Scoreboard(ParticipantOrder),
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Register { .. } => "register",
            Intent::StartSeason => "start_season",
            Intent::AssignRoundWinner(_) => "assign_round_winner",
            Intent::AssignVetoWinner(_) => "assign_veto_winner",
            Intent::Nominate(_) => "nominate",
            Intent::UseVeto(_) => "use_veto",
            Intent::ScheduleDoubleEviction => "schedule_double_eviction",
            Intent::StartVoting => "start_voting",
            Intent::CastVote(_) => "cast_vote",
            Intent::EndVoting => "end_voting",
            Intent::StartCompetition(_) => "start_competition",
            Intent::SubmitAnswer(_) => "submit_answer",
            Intent::EndCompetition => "end_competition",
            Intent::UseSecretPower => "use_secret_power",
            Intent::DeclareFinale => "declare_finale",
            Intent::RevealWinner => "reveal_winner",
            Intent::Scoreboard(_) => "scoreboard",
        }
    }

    /// Intents only an operator may issue
    pub fn requires_operator(&self) -> bool {
        matches!(
            self,
            Intent::StartSeason
                | Intent::AssignRoundWinner(_)
                | Intent::AssignVetoWinner(_)
                | Intent::ScheduleDoubleEviction
                | Intent::StartVoting
                | Intent::EndVoting
                | Intent::StartCompetition(_)
                | Intent::EndCompetition
                | Intent::DeclareFinale
                | Intent::RevealWinner
        )
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::AssignRoundWinner(id)
            | Intent::AssignVetoWinner(id)
            | Intent::Nominate(id)
            | Intent::UseVeto(id)
            | Intent::CastVote(id) => write!(f, "{}({})", self.name(), id),
            Intent::StartCompetition(kind) => write!(f, "{}({})", self.name(), kind),
            Intent::Scoreboard(order) => write!(f, "{}({})", self.name(), order.as_str()),
            // Answers stay out of logs and rejection messages
            _ => write!(f, "{}", self.name()),
        }
    }
}
