//! Season configuration container.
//!
//! [`SeasonConfig`] is built once at startup (from the config file or from
//! code in tests) and is read-only afterwards.

use showrunner_domain::{Actor, CompetitionKind, CompetitionSpec, ParticipantId, Role, SeasonRules};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

/// One configured competition kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetitionConfig {
    pub answer: String,
    pub duration: Duration,
    pub points: i64,
}

impl CompetitionConfig {
    pub fn new(answer: impl Into<String>, duration: Duration) -> Self {
        Self {
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

#[derive(Debug, Clone)]
pub struct SeasonConfig {
    operators: BTreeSet<ParticipantId>,
    rules: SeasonRules,
    reveal_delay: Duration,
    competitions: BTreeMap<CompetitionKind, CompetitionConfig>,
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self {
            operators: BTreeSet::new(),
            rules: SeasonRules::default(),
            reveal_delay: Duration::from_millis(3000),
            competitions: BTreeMap::new(),
        }
    }
}

impl SeasonConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Builders ====================

    pub fn with_operator(mut self, id: impl Into<ParticipantId>) -> Self {
        self.operators.insert(id.into());
        self
    }

    pub fn with_operators<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ParticipantId>,
    {
        self.operators.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_finalists(mut self, finalists: usize) -> Self {
        self.rules.finalists = finalists;
        self
    }

    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self
    }

    pub fn with_competition(mut self, kind: impl AsRef<str>, config: CompetitionConfig) -> Self {
        self.competitions.insert(CompetitionKind::new(kind), config);
        self
    }

    // ==================== Accessors ====================

    pub fn operators(&self) -> impl Iterator<Item = &ParticipantId> {
        self.operators.iter()
    }

    pub fn rules(&self) -> SeasonRules {
        self.rules
    }

    /// Pause before dramatic announcements (evictions, the winner reveal)
    pub fn reveal_delay(&self) -> Duration {
        self.reveal_delay
    }

    pub fn competition_kinds(&self) -> impl Iterator<Item = &CompetitionKind> {
        self.competitions.keys()
    }

    pub fn role_of(&self, id: &ParticipantId) -> Role {
        if self.operators.contains(id) {
            Role::Operator
        } else {
            Role::Player
        }
    }

    /// Resolve a caller id into an [`Actor`] with its configured role
    pub fn actor(&self, id: impl Into<ParticipantId>) -> Actor {
        let id = id.into();
        let role = self.role_of(&id);
        Actor::new(id, role)
    }

    pub fn competition_spec(&self, kind: &CompetitionKind) -> Option<CompetitionSpec> {
        self.competitions.get(kind).map(|c| {
            CompetitionSpec::new(kind.as_str(), c.answer.clone(), c.duration).with_points(c.points)
        })
    }
}
