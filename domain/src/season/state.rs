//! Season state machine
//!
//! [`Season`] owns every piece of session-level state: phase, round counter,
//! nominees, the vote ledger and the active competition. Each input method
//! checks all of its guards before touching any field, so a rejected input
//! leaves the season exactly as it was.
//!
//! Facts the season does not own (participant records, the roster) are passed
//! in by the caller, who reads them from the registry beforehand.

use super::nomination::{NominationRejection, NominationSet};
use super::phase::Phase;
use super::record::SeasonRecord;
use super::snapshot::{ActiveCompetition, SeasonSnapshot};
use super::transition::{Outcome, Transition};
use crate::competition::{
    CompetitionHandle, CompetitionSession, CompetitionSpec, ResolutionCause,
};
use crate::core::actor::Actor;
use crate::core::error::GameError;
use crate::core::participant::{Counter, Flag, Participant, ParticipantId, ParticipantUpdate};
use crate::vote::{RevokeRejection, Vote, VoteLedger, VoteTally};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::time::Instant;

/// Tunable season rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonRules {
    /// Remaining players at or below which the jury phase begins
    pub finalists: usize,
}

impl Default for SeasonRules {
    fn default() -> Self {
        Self { finalists: 3 }
    }
}

#[derive(Debug, Clone)]
pub struct Season {
    rules: SeasonRules,
    phase: Phase,
    season_number: u32,
    round: u32,
    authority: Option<ParticipantId>,
    veto_holder: Option<ParticipantId>,
    vetoed: Option<ParticipantId>,
    veto_used: bool,
    nominees: NominationSet,
    double_round: bool,
    ledger: VoteLedger,
    competition: Option<CompetitionSession>,
    jury: Vec<ParticipantId>,
    finalists: Vec<ParticipantId>,
    /// Display names of everyone the season has seen, for announcements
    names: BTreeMap<ParticipantId, String>,
    revision: u64,
}

impl Season {
    pub fn new(rules: SeasonRules, season_number: u32) -> Self {
        Self {
            rules,
            phase: Phase::Idle,
            season_number: season_number.max(1),
            round: 0,
            authority: None,
            veto_holder: None,
            vetoed: None,
            veto_used: false,
            nominees: NominationSet::new(),
            double_round: false,
            ledger: VoteLedger::new(),
            competition: None,
            jury: Vec::new(),
            finalists: Vec::new(),
            names: BTreeMap::new(),
            revision: 0,
        }
    }

    // ==================== Accessors ====================

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn season_number(&self) -> u32 {
        self.season_number
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn rules(&self) -> &SeasonRules {
        &self.rules
    }

    pub fn authority(&self) -> Option<&ParticipantId> {
        self.authority.as_ref()
    }

    pub fn veto_holder(&self) -> Option<&ParticipantId> {
        self.veto_holder.as_ref()
    }

    pub fn nominees(&self) -> &NominationSet {
        &self.nominees
    }

    pub fn is_double_round(&self) -> bool {
        self.double_round
    }

    pub fn ledger(&self) -> &VoteLedger {
        &self.ledger
    }

    pub fn active_competition(&self) -> Option<&CompetitionSession> {
        self.competition.as_ref()
    }

    pub fn jury(&self) -> &[ParticipantId] {
        &self.jury
    }

    pub fn finalists(&self) -> &[ParticipantId] {
        &self.finalists
    }

    /// Bumped on every committed change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot(&self) -> SeasonSnapshot {
        SeasonSnapshot {
            season_number: self.season_number,
            phase: self.phase,
            round: self.round,
            nominees: self.nominees.as_slice().to_vec(),
            authority: self.authority.clone(),
            veto_holder: self.veto_holder.clone(),
            double_round: self.double_round,
            competition: self.competition.as_ref().map(|c| ActiveCompetition {
                handle: c.handle(),
                kind: c.kind().clone(),
            }),
            jury: self.jury.clone(),
            finalists: self.finalists.clone(),
            revision: self.revision,
        }
    }

    // ==================== Helpers ====================

    fn commit(&mut self) {
        self.revision += 1;
    }

    fn require_phase(&self, allowed: &[Phase], input: &str) -> Result<(), GameError> {
        if allowed.contains(&self.phase) {
            return Ok(());
        }
        let expected = allowed
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(" or ");
        Err(GameError::phase_transition(
            self.phase,
            input,
            format!("only valid during {}", expected),
        ))
    }

    fn is_evicted(&self, participant: &Participant) -> bool {
        participant.flags.eliminated || self.jury.contains(&participant.id)
    }

    fn reset_round_state(&mut self) {
        self.nominees.clear();
        self.veto_holder = None;
        self.vetoed = None;
        self.veto_used = false;
    }

    fn remember(&mut self, participant: &Participant) {
        self.names
            .insert(participant.id.clone(), participant.display_name.clone());
    }

    fn remember_all(&mut self, roster: &[Participant]) {
        for participant in roster {
            self.remember(participant);
        }
    }

    /// Display name for announcements, falling back to the id
    fn name_of<'a>(&'a self, id: &'a ParticipantId) -> &'a str {
        self.names.get(id).map(String::as_str).unwrap_or(id.as_str())
    }

    // ==================== Season lifecycle ====================

    /// IDLE/SEASON_END → ROUND_COMPETITION
    ///
    /// Clears per-season flags on every participant in `roster`.
    pub fn start_season(&mut self, roster: &[Participant]) -> Result<Transition, GameError> {
        let input = "start_season";
        if !self.phase.is_terminal() {
            return Err(GameError::phase_transition(
                self.phase,
                input,
                format!("season {} is still running", self.season_number),
            ));
        }

        let resets: Vec<ParticipantUpdate> = roster
            .iter()
            .flat_map(|p| {
                Flag::ALL
                    .into_iter()
                    .filter(|flag| p.flags.get(*flag))
                    .map(|flag| ParticipantUpdate::set_flag(&p.id, flag, false))
            })
            .collect();

        self.competition = None;
        self.reset_round_state();
        self.authority = None;
        self.double_round = false;
        self.names.clear();
        self.remember_all(roster);
        self.ledger.clear();
        self.jury.clear();
        self.finalists.clear();
        self.round = 1;
        self.phase = Phase::RoundCompetition;
        self.commit();

        Ok(Transition::new(Outcome::SeasonStarted {
            season_number: self.season_number,
            round: self.round,
            participants: roster.len(),
        })
        .with_updates(resets)
        .announce(format!(
            "Season {} begins with {} players! Round 1: the head-of-round competition is on.",
            self.season_number,
            roster.len()
        )))
    }

    // ==================== Round ====================

    /// ROUND_COMPETITION → NOMINATION
    pub fn assign_round_winner(&mut self, winner: &Participant) -> Result<Transition, GameError> {
        let input = format!("assign_round_winner({})", winner.id);
        self.require_phase(&[Phase::RoundCompetition], &input)?;
        if self.is_evicted(winner) {
            return Err(GameError::invalid_target(
                self.phase,
                input,
                &winner.id,
                "has been evicted",
            ));
        }

        self.reset_round_state();
        self.remember(winner);
        self.authority = Some(winner.id.clone());
        self.phase = Phase::Nomination;
        self.commit();

        Ok(Transition::new(Outcome::RoundWinnerAssigned {
            participant: winner.id.clone(),
            round: self.round,
        })
        .with_update(ParticipantUpdate::increment(&winner.id, Counter::RoundWins, 1))
        .announce(format!(
            "{} is Head of Round for round {}! Name two nominees.",
            winner.display_name, self.round
        )))
    }

    /// Record the veto holder for this round (NOMINATION or VETO)
    pub fn assign_veto_winner(&mut self, winner: &Participant) -> Result<Transition, GameError> {
        let input = format!("assign_veto_winner({})", winner.id);
        self.require_phase(&[Phase::Nomination, Phase::Veto], &input)?;
        if self.veto_used {
            return Err(GameError::phase_transition(
                self.phase,
                input,
                "the veto has already been used this round",
            ));
        }
        if self.is_evicted(winner) {
            return Err(GameError::invalid_target(
                self.phase,
                input,
                &winner.id,
                "has been evicted",
            ));
        }

        self.remember(winner);
        self.veto_holder = Some(winner.id.clone());
        self.commit();

        Ok(Transition::new(Outcome::VetoWinnerAssigned {
            participant: winner.id.clone(),
            round: self.round,
        })
        .with_update(ParticipantUpdate::increment(&winner.id, Counter::VetoWins, 1))
        .announce(format!("{} wins the veto!", winner.display_name)))
    }

    /// NOMINATION → NOMINATION, or VETO once two nominees are named
    pub fn nominate(&mut self, actor: &Actor, target: &Participant) -> Result<Transition, GameError> {
        let input = format!("nominate({})", target.id);
        self.require_phase(&[Phase::Nomination], &input)?;
        if self.authority.as_ref() != Some(&actor.id) {
            return Err(GameError::unauthorized(self.phase, input, &actor.id));
        }
        if self.is_evicted(target) {
            return Err(GameError::invalid_target(
                self.phase,
                input,
                &target.id,
                "has been evicted",
            ));
        }
        if self.authority.as_ref() == Some(&target.id) {
            return Err(GameError::invalid_target(
                self.phase,
                input,
                &target.id,
                "is the head of round",
            ));
        }
        if self.vetoed.as_ref() == Some(&target.id) {
            return Err(GameError::invalid_target(
                self.phase,
                input,
                &target.id,
                "was saved by the veto this round",
            ));
        }

        match self.nominees.push(target.id.clone()) {
            Ok(_) => {}
            Err(NominationRejection::Duplicate) => {
                return Err(GameError::DuplicateNomination {
                    phase: self.phase,
                    target: target.id.clone(),
                });
            }
            Err(NominationRejection::Full) => {
                return Err(GameError::invalid_target(
                    self.phase,
                    input,
                    &target.id,
                    "cannot join a full nominee set",
                ));
            }
        }
        self.remember(target);
        if self.nominees.is_full() {
            self.phase = Phase::Veto;
        }
        self.commit();

        let mut transition = Transition::new(Outcome::Nominated {
            target: target.id.clone(),
            nominees: self.nominees.as_slice().to_vec(),
            phase: self.phase,
        })
        .announce(format!("{} has been nominated.", target.display_name));
        if self.phase == Phase::Veto {
            transition = transition.announce("Nominations are locked. The veto may now be used.");
        }
        Ok(transition)
    }

    /// VETO → NOMINATION (awaiting a replacement nominee)
    ///
    /// Usable once per round by an operator, the head of round, or the veto holder.
    pub fn use_veto(&mut self, actor: &Actor, target: &ParticipantId) -> Result<Transition, GameError> {
        let input = format!("use_veto({})", target);
        self.require_phase(&[Phase::Veto], &input)?;
        let may_use = actor.is_operator()
            || self.authority.as_ref() == Some(&actor.id)
            || self.veto_holder.as_ref() == Some(&actor.id);
        if !may_use {
            return Err(GameError::unauthorized(self.phase, input, &actor.id));
        }
        if self.veto_used {
            return Err(GameError::phase_transition(
                self.phase,
                input,
                "the veto has already been used this round",
            ));
        }
        if !self.nominees.contains(target) {
            return Err(GameError::invalid_target(
                self.phase,
                input,
                target,
                "is not nominated",
            ));
        }

        self.nominees.remove(target);
        self.vetoed = Some(target.clone());
        self.veto_used = true;
        self.phase = Phase::Nomination;
        self.commit();

        Ok(Transition::new(Outcome::VetoUsed {
            removed: target.clone(),
            nominees: self.nominees.as_slice().to_vec(),
        })
        .announce(format!(
            "The veto has been used on {}. Head of round, name a replacement nominee.",
            self.name_of(target)
        )))
    }

    /// Flag the current round for a second eviction
    pub fn schedule_double_eviction(&mut self) -> Result<Transition, GameError> {
        let input = "schedule_double_eviction";
        self.require_phase(
            &[Phase::RoundCompetition, Phase::Nomination, Phase::Veto],
            input,
        )?;

        self.double_round = true;
        self.commit();

        Ok(Transition::new(Outcome::DoubleEvictionScheduled { round: self.round })
            .announce(format!("Round {} will be a double eviction!", self.round)))
    }

    // ==================== Voting ====================

    /// VETO/NOMINATION → VOTING, with exactly two nominees
    pub fn start_voting(&mut self) -> Result<Transition, GameError> {
        let input = "start_voting";
        self.require_phase(&[Phase::Nomination, Phase::Veto], input)?;
        if self.nominees.len() != NominationSet::CAPACITY {
            return Err(GameError::phase_transition(
                self.phase,
                input,
                format!(
                    "{} of {} nominees named",
                    self.nominees.len(),
                    NominationSet::CAPACITY
                ),
            ));
        }

        self.ledger.open_round(self.round);
        self.phase = Phase::Voting;
        self.commit();

        let names = self
            .nominees
            .iter()
            .map(|id| self.name_of(id))
            .collect::<Vec<_>>()
            .join(" vs ");
        Ok(Transition::new(Outcome::VotingOpened {
            round: self.round,
            nominees: self.nominees.as_slice().to_vec(),
        })
        .announce(format!("Voting is open for round {}: {}", self.round, names)))
    }

    /// Upsert `voter`'s ballot for the current round.
    ///
    /// During VOTING any non-evicted player may vote for a nominee; during the
    /// FINALE only jurors may vote, and only for a finalist.
    pub fn cast_vote(&mut self, voter: &Participant, target: &ParticipantId) -> Result<Transition, GameError> {
        let input = format!("cast_vote({})", target);
        self.require_phase(&[Phase::Voting, Phase::Finale], &input)?;
        if self.phase == Phase::Finale {
            if !self.jury.contains(&voter.id) {
                return Err(GameError::unauthorized(self.phase, input, &voter.id));
            }
            if !self.finalists.contains(target) {
                return Err(GameError::invalid_target(
                    self.phase,
                    input,
                    target,
                    "is not a finalist",
                ));
            }
        } else {
            if self.is_evicted(voter) {
                return Err(GameError::unauthorized(self.phase, input, &voter.id));
            }
            if !self.nominees.contains(target) {
                return Err(GameError::invalid_target(
                    self.phase,
                    input,
                    target,
                    "is not nominated",
                ));
            }
        }

        let replaced = self
            .ledger
            .record(Vote::new(voter.id.clone(), target.clone(), self.round))
            .is_some();
        self.remember(voter);
        self.commit();

        Ok(Transition::new(Outcome::VoteRecorded {
            voter: voter.id.clone(),
            target: target.clone(),
            round: self.round,
            replaced,
        }))
    }

    /// Spend `participant`'s one-time power to cancel their live vote
    pub fn use_secret_power(&mut self, participant: &ParticipantId) -> Result<Transition, GameError> {
        let input = "use_secret_power";
        self.require_phase(&[Phase::Voting, Phase::Finale], input)?;

        let revoked = match self.ledger.revoke(participant, self.round) {
            Ok(vote) => vote,
            Err(RevokeRejection::PowerAlreadyUsed) => {
                return Err(GameError::PowerAlreadyUsed {
                    phase: self.phase,
                    participant: participant.clone(),
                });
            }
            Err(RevokeRejection::NoLiveVote) => {
                return Err(GameError::NotFound {
                    phase: self.phase,
                    what: "live vote".to_string(),
                    id: format!("{} in round {}", participant, self.round),
                });
            }
        };
        self.commit();

        Ok(Transition::new(Outcome::PowerUsed { revoked })
            .with_update(ParticipantUpdate::set_flag(participant, Flag::PowerConsumed, true))
            .announce("A secret power has been used: one vote has vanished."))
    }

    /// VOTING → EVICTION → ROUND_COMPETITION | NOMINATION | JURY
    ///
    /// The most-voted nominee is evicted; ties go to whoever was nominated
    /// first. `roster` is the full participant list, used to count who remains.
    pub fn end_voting(&mut self, roster: &[Participant]) -> Result<Transition, GameError> {
        let input = "end_voting";
        self.require_phase(&[Phase::Voting], input)?;
        let tally = VoteTally::tally(
            self.round,
            self.ledger.votes_for_round(self.round),
            self.nominees.as_slice(),
        )
        .ok_or(GameError::NoVotesCast {
            phase: self.phase,
            round: self.round,
        })?;

        let evicted = tally.selected.clone();
        let round = self.round;
        self.remember_all(roster);
        self.phase = Phase::Eviction;
        self.jury.push(evicted.clone());

        let remaining = roster.iter().filter(|p| !self.is_evicted(p)).count();
        let follow_up = if remaining <= self.rules.finalists {
            self.double_round = false;
            self.round += 1;
            self.reset_round_state();
            self.authority = None;
            self.phase = Phase::Jury;
            format!("{} players remain. The jury is set; the finale awaits.", remaining)
        } else if self.double_round {
            self.double_round = false;
            self.reset_round_state();
            self.phase = Phase::Nomination;
            "Double eviction! Head of round, name two new nominees.".to_string()
        } else {
            self.round += 1;
            self.reset_round_state();
            self.authority = None;
            self.phase = Phase::RoundCompetition;
            format!("Round {} begins!", self.round)
        };
        self.commit();

        let text = format!(
            "By a vote of {}, {} has been evicted. {}",
            tally.summary(),
            self.name_of(&evicted),
            follow_up
        );

        Ok(Transition::new(Outcome::Evicted {
            evicted: evicted.clone(),
            tally,
            round,
            next_round: self.round,
            next_phase: self.phase,
        })
        .with_update(ParticipantUpdate::set_flag(&evicted, Flag::Eliminated, true))
        .with_update(ParticipantUpdate::set_flag(&evicted, Flag::InJury, true))
        .announce_dramatic(text))
    }

    // ==================== Finale ====================

    /// Any pre-finale phase → FINALE, once few enough players remain.
    ///
    /// `roster` order becomes the finalist order, which breaks jury-vote ties.
    pub fn declare_finale(&mut self, roster: &[Participant]) -> Result<Transition, GameError> {
        let input = "declare_finale";
        if !self.phase.is_pre_finale() {
            return Err(GameError::phase_transition(
                self.phase,
                input,
                "only valid while a season is running",
            ));
        }
        let remaining: Vec<ParticipantId> = roster
            .iter()
            .filter(|p| !self.is_evicted(p))
            .map(|p| p.id.clone())
            .collect();
        if remaining.is_empty() {
            return Err(GameError::phase_transition(self.phase, input, "no players remain"));
        }
        if remaining.len() > self.rules.finalists {
            return Err(GameError::phase_transition(
                self.phase,
                input,
                format!(
                    "{} players remain; at most {} may reach the finale",
                    remaining.len(),
                    self.rules.finalists
                ),
            ));
        }

        self.ledger.open_round(self.round);
        self.reset_round_state();
        self.authority = None;
        self.double_round = false;
        self.remember_all(roster);
        self.finalists = remaining;
        self.phase = Phase::Finale;
        self.commit();

        let names = self
            .finalists
            .iter()
            .map(|id| self.name_of(id))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(Transition::new(Outcome::FinaleDeclared {
            finalists: self.finalists.clone(),
            jury: self.jury.clone(),
        })
        .announce(format!(
            "The finale begins! Finalists: {}. Jurors, cast your votes.",
            names
        )))
    }

    /// FINALE → SEASON_END
    ///
    /// The finalist with the most jury votes wins; a lone finalist wins
    /// without a vote.
    pub fn reveal_winner(&mut self, now: DateTime<Utc>) -> Result<Transition, GameError> {
        let input = "reveal_winner";
        self.require_phase(&[Phase::Finale], input)?;

        let tally = VoteTally::tally(
            self.round,
            self.ledger.votes_for_round(self.round),
            &self.finalists,
        );
        let winner = match (&tally, self.finalists.as_slice()) {
            (Some(t), _) => t.selected.clone(),
            (None, [only]) => only.clone(),
            (None, _) => {
                return Err(GameError::NoVotesCast {
                    phase: self.phase,
                    round: self.round,
                });
            }
        };

        let record = SeasonRecord::new(self.season_number, winner.clone(), now);
        self.competition = None;
        self.season_number += 1;
        self.phase = Phase::SeasonEnd;
        self.commit();

        Ok(Transition::new(Outcome::WinnerRevealed {
            record: record.clone(),
            tally,
        })
        .with_archive(record.clone())
        .announce_dramatic(format!(
            "The winner of season {} is {}!",
            record.season_number,
            self.name_of(&winner)
        )))
    }

    // ==================== Competitions ====================

    /// Begin a timed competition; only one may run at a time
    pub fn start_competition(
        &mut self,
        spec: CompetitionSpec,
        handle: CompetitionHandle,
        now: Instant,
    ) -> Result<Transition, GameError> {
        let input = format!("start_competition({})", spec.kind);
        if self.phase.is_terminal() {
            return Err(GameError::phase_transition(
                self.phase,
                input,
                "no season is running",
            ));
        }
        if let Some(active) = &self.competition {
            return Err(GameError::AlreadyActive {
                phase: self.phase,
                kind: active.kind().to_string(),
            });
        }

        let kind = spec.kind.clone();
        let duration_secs = spec.duration.as_secs();
        self.competition = Some(CompetitionSession::new(handle, spec, now));
        self.commit();

        Ok(Transition::new(Outcome::CompetitionStarted {
            handle,
            kind: kind.clone(),
            duration_secs,
        })
        .announce(format!(
            "The {} competition has started! You have {} seconds.",
            kind, duration_secs
        )))
    }

    /// Check an answer against the running competition
    pub fn submit_answer(
        &mut self,
        participant: &Participant,
        answer: &str,
        now: Instant,
    ) -> Result<Transition, GameError> {
        let input = "submit_answer";
        let phase = self.phase;
        if self.is_evicted(participant) {
            return Err(GameError::unauthorized(phase, input, &participant.id));
        }
        let Some(session) = self.competition.as_mut().filter(|s| s.is_open(now)) else {
            return Err(GameError::phase_transition(
                phase,
                input,
                "no competition is running",
            ));
        };

        let result = session.submit(&participant.id, answer, now);
        if result == crate::competition::AnswerOutcome::Correct {
            self.remember(participant);
            self.commit();
        }

        Ok(Transition::new(Outcome::AnswerRecorded {
            participant: participant.id.clone(),
            result,
        }))
    }

    /// Explicit cancellation: resolve the running competition now
    pub fn end_competition(&mut self) -> Result<Transition, GameError> {
        let Some(session) = self.competition.take() else {
            return Err(GameError::phase_transition(
                self.phase,
                "end_competition",
                "no competition is running",
            ));
        };
        Ok(self.finish_competition(session, ResolutionCause::Cancelled))
    }

    /// Deadline reached for `handle`. Returns `None` when `handle` is no
    /// longer the active session (cancelled or superseded).
    pub fn expire_competition(&mut self, handle: CompetitionHandle) -> Option<Transition> {
        if self.competition.as_ref().map(|c| c.handle()) != Some(handle) {
            return None;
        }
        let session = self.competition.take()?;
        Some(self.finish_competition(session, ResolutionCause::Deadline))
    }

    fn finish_competition(&mut self, session: CompetitionSession, cause: ResolutionCause) -> Transition {
        let result = session.resolve(cause);
        self.commit();

        let mut transition = Transition::new(Outcome::CompetitionResolved {
            result: result.clone(),
        });
        match &result.winner {
            Some(winner) => {
                if result.points != 0 {
                    transition = transition.with_update(ParticipantUpdate::increment(
                        winner,
                        Counter::Points,
                        result.points,
                    ));
                }
                transition.announce(format!(
                    "{} wins the {} competition (+{} points)!",
                    self.name_of(winner),
                    result.kind,
                    result.points
                ))
            }
            None => transition.announce(format!(
                "The {} competition is over. Nobody answered correctly.",
                result.kind
            )),
        }
    }
}
