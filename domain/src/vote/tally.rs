//! Vote tally
//!
//! Groups a round's ballots by target, ranks targets by count, and selects the
//! top target. Ties on the top count are broken by a caller-supplied priority
//! list (nomination order for evictions, finalist order at the finale), so the
//! same ballots always select the same target.

use super::ledger::Vote;
use crate::core::participant::ParticipantId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Votes received by one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyEntry {
    pub target: ParticipantId,
    pub count: usize,
}

/// Ranked result of a tally
///
/// # Example
///
/// ```
/// use showrunner_domain::vote::{Vote, VoteTally};
/// use showrunner_domain::ParticipantId;
///
/// let a = ParticipantId::new("a");
/// let b = ParticipantId::new("b");
/// let votes = vec![
///     Vote::new("v1".into(), b.clone(), 1),
///     Vote::new("v2".into(), a.clone(), 1),
/// ];
///
/// // One vote each: `a` was nominated first, so `a` is selected.
/// let result = VoteTally::tally(1, &votes, &[a.clone(), b]).unwrap();
/// assert_eq!(result.selected, a);
/// assert!(result.tie_broken);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyResult {
    pub round: u32,
    /// Targets ranked by count (descending), ties in priority order
    pub entries: Vec<TallyEntry>,
    pub total_votes: usize,
    /// Target with the most votes
    pub selected: ParticipantId,
    /// Whether the top count was shared and priority decided
    pub tie_broken: bool,
}

impl TallyResult {
    pub fn count_for(&self, target: &ParticipantId) -> usize {
        self.entries
            .iter()
            .find(|e| &e.target == target)
            .map(|e| e.count)
            .unwrap_or(0)
    }

    /// Every ballot went to the selected target
    pub fn is_unanimous(&self) -> bool {
        self.entries.len() == 1
    }

    /// Compact summary, e.g. `"bob:2 carol:1"`
    pub fn summary(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}:{}", e.target, e.count))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub struct VoteTally;

impl VoteTally {
    /// Tally `votes` for `round`. Returns `None` when no ballot was cast.
    ///
    /// Targets missing from `priority` rank after every listed target and
    /// are ordered among themselves by id.
    pub fn tally<'a>(
        round: u32,
        votes: impl IntoIterator<Item = &'a Vote>,
        priority: &[ParticipantId],
    ) -> Option<TallyResult> {
        let mut counts: HashMap<&ParticipantId, usize> = HashMap::new();
        let mut total_votes = 0;
        for vote in votes {
            *counts.entry(&vote.target).or_insert(0) += 1;
            total_votes += 1;
        }
        if total_votes == 0 {
            return None;
        }

        let rank = |target: &ParticipantId| {
            priority
                .iter()
                .position(|p| p == target)
                .unwrap_or(usize::MAX)
        };

        let mut entries: Vec<TallyEntry> = counts
            .into_iter()
            .map(|(target, count)| TallyEntry {
                target: target.clone(),
                count,
            })
            .collect();
        entries.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| rank(&a.target).cmp(&rank(&b.target)))
                .then_with(|| a.target.cmp(&b.target))
        });

        let tie_broken = entries.len() > 1 && entries[0].count == entries[1].count;
        let selected = entries[0].target.clone();

        Some(TallyResult {
            round,
            entries,
            total_votes,
            selected,
            tie_broken,
        })
    }
}
