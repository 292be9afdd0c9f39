//! Vote ledger
//!
//! Holds one live vote per `(voter, round)` and the per-season record of who
//! has spent their one-time power. Both live in the same structure so a
//! revocation is a single mutation: the power check, the power consumption and
//! the vote removal cannot be split by a concurrent `record`.

use crate::core::participant::ParticipantId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A single ballot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub voter: ParticipantId,
    pub target: ParticipantId,
    pub round: u32,
}

impl Vote {
    pub fn new(voter: ParticipantId, target: ParticipantId, round: u32) -> Self {
        Self {
            voter,
            target,
            round,
        }
    }
}

/// Why a revocation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeRejection {
    /// The voter spent their power earlier this season
    PowerAlreadyUsed,
    /// The voter has no live vote in this round; the power is not spent
    NoLiveVote,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteLedger {
    votes: BTreeMap<(u32, ParticipantId), Vote>,
    powers_used: BTreeSet<ParticipantId>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert a vote; returns the vote it replaced, if any
    pub fn record(&mut self, vote: Vote) -> Option<Vote> {
        self.votes
            .insert((vote.round, vote.voter.clone()), vote)
    }

    /// Spend `voter`'s one-time power to remove their live vote in `round`
    pub fn revoke(&mut self, voter: &ParticipantId, round: u32) -> Result<Vote, RevokeRejection> {
        if self.powers_used.contains(voter) {
            return Err(RevokeRejection::PowerAlreadyUsed);
        }
        let vote = self
            .votes
            .remove(&(round, voter.clone()))
            .ok_or(RevokeRejection::NoLiveVote)?;
        self.powers_used.insert(voter.clone());
        Ok(vote)
    }

    pub fn live_vote(&self, voter: &ParticipantId, round: u32) -> Option<&Vote> {
        self.votes.get(&(round, voter.clone()))
    }

    pub fn votes_for_round(&self, round: u32) -> impl Iterator<Item = &Vote> {
        self.votes
            .range((round, ParticipantId::new(""))..)
            .take_while(move |((r, _), _)| *r == round)
            .map(|(_, vote)| vote)
    }

    pub fn count_for_round(&self, round: u32) -> usize {
        self.votes_for_round(round).count()
    }

    /// Open a fresh ballot for `round`, discarding ballots left over from an
    /// earlier eviction in the same round (double rounds).
    pub fn open_round(&mut self, round: u32) -> usize {
        let before = self.votes.len();
        self.votes.retain(|(r, _), _| *r != round);
        before - self.votes.len()
    }

    pub fn power_used(&self, voter: &ParticipantId) -> bool {
        self.powers_used.contains(voter)
    }

    /// Forget all votes and powers (new season)
    pub fn clear(&mut self) {
        self.votes.clear();
        self.powers_used.clear();
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}
