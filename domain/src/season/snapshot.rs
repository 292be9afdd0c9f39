//! Read-only view of a season for scoreboards and status displays

use super::phase::Phase;
use crate::competition::{CompetitionHandle, CompetitionKind};
use crate::core::participant::ParticipantId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveCompetition {
    pub handle: CompetitionHandle,
    pub kind: CompetitionKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonSnapshot {
    pub season_number: u32,
    pub phase: Phase,
    pub round: u32,
    pub nominees: Vec<ParticipantId>,
    pub authority: Option<ParticipantId>,
    pub veto_holder: Option<ParticipantId>,
    pub double_round: bool,
    pub competition: Option<ActiveCompetition>,
    pub jury: Vec<ParticipantId>,
    pub finalists: Vec<ParticipantId>,
    pub revision: u64,
}
