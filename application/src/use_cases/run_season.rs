//! Run Season use case
//!
//! [`SeasonService`] is the single entry point for command intents. It owns
//! the per-season lock, the competition deadline task and every collaborator
//! call. The session lock is only held while the pure state machine runs;
//! registry, archive and announcer I/O always happen outside it. A second
//! write lock orders whole transitions, so a transition's collaborator writes
//! finish (or are rolled back) before the next transition starts.
//!
//! # Intent flow
//!
//! 1. Operator check (uniform, before any phase logic)
//! 2. Registry reads needed by the guards, outside both locks
//! 3. Take the write lock, held until step 5 is done
//! 4. Under the session lock: snapshot the season, apply the transition,
//!    re-arm the deadline timer, publish the new [`SeasonSnapshot`]
//! 5. After the session lock: archive record first, then the registry batch
//! 6. On collaborator failure: restore the snapshot and return
//!    `CollaboratorUnavailable`
//! 7. Announcements go out fire-and-forget once both writes succeeded

use crate::command::Intent;
use crate::config::SeasonConfig;
use crate::ports::CollaboratorError;
use crate::ports::announcer::Announcer;
use crate::ports::player_registry::PlayerRegistry;
use crate::ports::season_archive::SeasonArchive;
use chrono::Utc;
use showrunner_domain::{
    Actor, Announcement, CompetitionHandle, GameError, Outcome, Participant, ParticipantId,
    ParticipantOrder, Phase, Season, SeasonSnapshot, Transition,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const REGISTRY: &str = "registry";
const ARCHIVE: &str = "archive";

/// Pending deadline of the active competition
struct DeadlineTimer {
    handle: CompetitionHandle,
    cancel: CancellationToken,
}

struct SessionState {
    season: Season,
    timer: Option<DeadlineTimer>,
    next_handle: u64,
}

impl SessionState {
    fn allocate_handle(&mut self) -> CompetitionHandle {
        self.next_handle += 1;
        CompetitionHandle::new(self.next_handle)
    }
}

struct Shared {
    config: SeasonConfig,
    registry: Arc<dyn PlayerRegistry>,
    archive: Arc<dyn SeasonArchive>,
    announcer: Arc<dyn Announcer>,
    /// Orders transitions with their collaborator writes. Taken before `session`.
    writes: Mutex<()>,
    session: Mutex<SessionState>,
    snapshot_tx: watch::Sender<SeasonSnapshot>,
}

/// Season orchestration service
///
/// Cheap to clone; clones share the same season.
#[derive(Clone)]
pub struct SeasonService {
    shared: Arc<Shared>,
}

impl SeasonService {
    /// Create a service for season 1
    pub fn new(
        config: SeasonConfig,
        registry: Arc<dyn PlayerRegistry>,
        archive: Arc<dyn SeasonArchive>,
        announcer: Arc<dyn Announcer>,
    ) -> Self {
        Self::with_season_number(config, registry, archive, announcer, 1)
    }

    /// Create a service that continues numbering after the archive's latest season
    pub async fn open(
        config: SeasonConfig,
        registry: Arc<dyn PlayerRegistry>,
        archive: Arc<dyn SeasonArchive>,
        announcer: Arc<dyn Announcer>,
    ) -> Result<Self, GameError> {
        let latest = archive
            .latest_season_number()
            .await
            .map_err(|e| collaborator_failure(Phase::Idle, "open", ARCHIVE, e))?;
        let season_number = latest.map_or(1, |n| n.saturating_add(1));
        info!(season = season_number, "Opening season service");
        Ok(Self::with_season_number(
            config,
            registry,
            archive,
            announcer,
            season_number,
        ))
    }

    fn with_season_number(
        config: SeasonConfig,
        registry: Arc<dyn PlayerRegistry>,
        archive: Arc<dyn SeasonArchive>,
        announcer: Arc<dyn Announcer>,
        season_number: u32,
    ) -> Self {
        let season = Season::new(config.rules(), season_number);
        let (snapshot_tx, _) = watch::channel(season.snapshot());
        Self {
            shared: Arc::new(Shared {
                config,
                registry,
                archive,
                announcer,
                writes: Mutex::new(()),
                session: Mutex::new(SessionState {
                    season,
                    timer: None,
                    next_handle: 0,
                }),
                snapshot_tx,
            }),
        }
    }

    pub fn config(&self) -> &SeasonConfig {
        &self.shared.config
    }

    /// Latest published snapshot. Never takes the session lock.
    pub fn snapshot(&self) -> SeasonSnapshot {
        self.shared.snapshot_tx.borrow().clone()
    }

    /// Receive a new snapshot after every committed transition
    pub fn subscribe(&self) -> watch::Receiver<SeasonSnapshot> {
        self.shared.snapshot_tx.subscribe()
    }

    /// Snapshot plus the registry roster in `order`
    pub async fn scoreboard(
        &self,
        order: ParticipantOrder,
    ) -> Result<(SeasonSnapshot, Vec<Participant>), GameError> {
        let snapshot = self.snapshot();
        let participants = self
            .shared
            .registry
            .list_participants(order)
            .await
            .map_err(|e| collaborator_failure(snapshot.phase, "scoreboard", REGISTRY, e))?;
        Ok((snapshot, participants))
    }

    /// Handle one intent from `actor`
    pub async fn handle(&self, actor: &Actor, intent: Intent) -> Result<Outcome, GameError> {
        let input = intent.to_string();
        let result = self.dispatch(actor, intent, &input).await;
        if let Err(e) = &result {
            if e.is_collaborator_failure() {
                warn!(actor = %actor.id, input = %input, "{}", e);
            } else {
                debug!(actor = %actor.id, input = %input, code = %e.code(), "Rejected: {}", e);
            }
        }
        result
    }

    async fn dispatch(&self, actor: &Actor, intent: Intent, input: &str) -> Result<Outcome, GameError> {
        if intent.requires_operator() && !actor.is_operator() {
            return Err(GameError::Unauthorized {
                phase: self.snapshot().phase,
                input: input.to_string(),
                actor: actor.id.clone(),
            });
        }

        match intent {
            Intent::Register { display_name } => self.register(actor, display_name, input).await,
            Intent::StartSeason => {
                let roster = self.roster(input).await?;
                self.commit(input, |s| s.season.start_season(&roster)).await
            }
            Intent::AssignRoundWinner(id) => {
                let winner = self.lookup(&id, input).await?;
                self.commit(input, |s| s.season.assign_round_winner(&winner))
                    .await
            }
            Intent::AssignVetoWinner(id) => {
                let winner = self.lookup(&id, input).await?;
                self.commit(input, |s| s.season.assign_veto_winner(&winner))
                    .await
            }
            Intent::Nominate(id) => {
                let target = self.lookup(&id, input).await?;
                self.commit(input, |s| s.season.nominate(actor, &target)).await
            }
            Intent::UseVeto(id) => self.commit(input, |s| s.season.use_veto(actor, &id)).await,
            Intent::ScheduleDoubleEviction => {
                self.commit(input, |s| s.season.schedule_double_eviction())
                    .await
            }
            Intent::StartVoting => self.commit(input, |s| s.season.start_voting()).await,
            Intent::CastVote(target) => {
                let voter = self.lookup(&actor.id, input).await?;
                self.commit(input, |s| s.season.cast_vote(&voter, &target))
                    .await
            }
            Intent::EndVoting => {
                let roster = self.roster(input).await?;
                self.commit(input, |s| s.season.end_voting(&roster)).await
            }
            Intent::StartCompetition(kind) => {
                let spec = self.shared.config.competition_spec(&kind).ok_or_else(|| {
                    GameError::NotFound {
                        phase: self.snapshot().phase,
                        what: "competition".to_string(),
                        id: kind.to_string(),
                    }
                })?;
                self.commit(input, |s| {
                    // A rejected start leaves the handle counter untouched
                    if let Some(active) = s.season.active_competition() {
                        return Err(GameError::AlreadyActive {
                            phase: s.season.phase(),
                            kind: active.kind().to_string(),
                        });
                    }
                    let handle = s.allocate_handle();
                    s.season.start_competition(spec, handle, now())
                })
                .await
            }
            Intent::SubmitAnswer(answer) => {
                let participant = self.lookup(&actor.id, input).await?;
                self.commit(input, |s| s.season.submit_answer(&participant, &answer, now()))
                    .await
            }
            Intent::EndCompetition => self.commit(input, |s| s.season.end_competition()).await,
            Intent::UseSecretPower => {
                self.commit(input, |s| s.season.use_secret_power(&actor.id))
                    .await
            }
            Intent::DeclareFinale => {
                let roster = self.roster(input).await?;
                self.commit(input, |s| s.season.declare_finale(&roster)).await
            }
            Intent::RevealWinner => {
                self.commit(input, |s| s.season.reveal_winner(Utc::now()))
                    .await
            }
            Intent::Scoreboard(order) => {
                let (snapshot, participants) = self.scoreboard(order).await?;
                Ok(Outcome::Scoreboard {
                    snapshot,
                    participants,
                })
            }
        }
    }

    // ==================== Collaborator reads ====================

    async fn register(
        &self,
        actor: &Actor,
        display_name: Option<String>,
        input: &str,
    ) -> Result<Outcome, GameError> {
        let name = display_name.unwrap_or_else(|| actor.id.to_string());
        let registration = self
            .shared
            .registry
            .upsert_participant(&actor.id, &name)
            .await
            .map_err(|e| collaborator_failure(self.snapshot().phase, input, REGISTRY, e))?;

        if registration.created {
            info!(participant = %actor.id, "Registered participant");
            self.shared
                .announcer
                .announce(&format!("Welcome, {}!", registration.participant.display_name));
        }
        Ok(Outcome::Registered {
            participant: registration.participant.id,
            created: registration.created,
        })
    }

    async fn lookup(&self, id: &ParticipantId, input: &str) -> Result<Participant, GameError> {
        let phase = self.snapshot().phase;
        self.shared
            .registry
            .get_participant(id)
            .await
            .map_err(|e| collaborator_failure(phase, input, REGISTRY, e))?
            .ok_or_else(|| GameError::NotFound {
                phase,
                what: "participant".to_string(),
                id: id.to_string(),
            })
    }

    async fn roster(&self, input: &str) -> Result<Vec<Participant>, GameError> {
        self.shared
            .registry
            .list_participants(ParticipantOrder::Points)
            .await
            .map_err(|e| collaborator_failure(self.snapshot().phase, input, REGISTRY, e))
    }

    // ==================== Transitions ====================

    /// Run `apply` under the session lock, then carry out its effects.
    ///
    /// The write lock is held throughout, so no other transition can commit
    /// between this one and its rollback.
    async fn commit<F>(&self, input: &str, apply: F) -> Result<Outcome, GameError>
    where
        F: FnOnce(&mut SessionState) -> Result<Transition, GameError>,
    {
        let _writes = self.shared.writes.lock().await;
        let (transition, before) = {
            let mut session = self.shared.session.lock().await;
            let before = session.season.clone();
            let transition = apply(&mut *session)?;
            if session.season.revision() != before.revision() {
                self.sync_timer(&mut *session);
                self.publish(&session.season);
                info!(
                    from = %before.phase(),
                    to = %session.season.phase(),
                    round = session.season.round(),
                    "{}",
                    input
                );
            }
            (transition, before)
        };

        if let Err(e) = self.carry_out(&transition, input).await {
            self.restore(before).await;
            return Err(e);
        }
        self.announce(&transition.announcements);
        Ok(transition.outcome)
    }

    /// Archive first, then the registry batch
    async fn carry_out(&self, transition: &Transition, input: &str) -> Result<(), GameError> {
        if let Some(record) = &transition.archive {
            self.shared
                .archive
                .record_season(record)
                .await
                .map_err(|e| collaborator_failure(self.snapshot().phase, input, ARCHIVE, e))?;
        }
        if !transition.updates.is_empty() {
            self.shared
                .registry
                .apply(&transition.updates)
                .await
                .map_err(|e| collaborator_failure(self.snapshot().phase, input, REGISTRY, e))?;
        }
        Ok(())
    }

    /// Put back the season from before a transition. Caller holds the write lock.
    async fn restore(&self, before: Season) {
        let mut session = self.shared.session.lock().await;
        debug!(revision = before.revision(), "Restoring season after failed collaborator write");
        session.season = before;
        self.sync_timer(&mut *session);
        self.publish(&session.season);
    }

    fn announce(&self, announcements: &[Announcement]) {
        for announcement in announcements {
            if announcement.dramatic {
                self.shared
                    .announcer
                    .announce_after_delay(&announcement.text, self.shared.config.reveal_delay());
            } else {
                self.shared.announcer.announce(&announcement.text);
            }
        }
    }

    fn publish(&self, season: &Season) {
        self.shared.snapshot_tx.send_replace(season.snapshot());
    }

    // ==================== Competition deadline ====================

    /// Make the pending deadline task match the season's active competition.
    ///
    /// Called with the lock held, so a cancelled token is always observed by
    /// the deadline task before it can touch the season.
    fn sync_timer(&self, session: &mut SessionState) {
        let active = session
            .season
            .active_competition()
            .map(|c| (c.handle(), c.deadline()));
        let current = session.timer.as_ref().map(|t| t.handle);
        if current.is_some() && current == active.map(|(handle, _)| handle) {
            return;
        }
        if let Some(timer) = session.timer.take() {
            debug!(handle = %timer.handle, "Cancelling competition deadline");
            timer.cancel.cancel();
        }
        if let Some((handle, deadline)) = active {
            session.timer = Some(self.spawn_deadline(handle, deadline));
        }
    }

    fn spawn_deadline(&self, handle: CompetitionHandle, deadline: Instant) -> DeadlineTimer {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let service = self.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)) => {
                    service.on_deadline(handle, &token).await;
                }
            }
        });

        DeadlineTimer { handle, cancel }
    }

    async fn on_deadline(&self, handle: CompetitionHandle, token: &CancellationToken) {
        let _writes = self.shared.writes.lock().await;
        let transition = {
            let mut session = self.shared.session.lock().await;
            if token.is_cancelled() {
                return;
            }
            let Some(transition) = session.season.expire_competition(handle) else {
                return;
            };
            if session.timer.as_ref().map(|t| t.handle) == Some(handle) {
                session.timer = None;
            }
            self.publish(&session.season);
            info!(handle = %handle, "Competition deadline reached");
            transition
        };

        // No caller to hand a failure back to; points stay unawarded
        if let Err(e) = self.carry_out(&transition, "competition_deadline").await {
            warn!(handle = %handle, "Failed to award competition points: {}", e);
            return;
        }
        self.announce(&transition.announcements);
    }
}

fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

fn collaborator_failure(
    phase: Phase,
    input: &str,
    collaborator: &str,
    error: CollaboratorError,
) -> GameError {
    GameError::CollaboratorUnavailable {
        phase,
        input: input.to_string(),
        collaborator: collaborator.to_string(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompetitionConfig;
    use crate::ports::player_registry::Registration;
    use async_trait::async_trait;
    use showrunner_domain::{Flag, ParticipantUpdate, ReasonCode, SeasonRecord};
    use std::collections::BTreeMap;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    // === Mock implementations ===

    #[derive(Default)]
    struct MockRegistry {
        participants: StdMutex<BTreeMap<ParticipantId, Participant>>,
        fail_writes: AtomicBool,
    }

    #[async_trait]
    impl PlayerRegistry for MockRegistry {
        async fn get_participant(
            &self,
            id: &ParticipantId,
        ) -> Result<Option<Participant>, CollaboratorError> {
            Ok(self.participants.lock().unwrap().get(id).cloned())
        }

        async fn upsert_participant(
            &self,
            id: &ParticipantId,
            display_name: &str,
        ) -> Result<Registration, CollaboratorError> {
            let mut participants = self.participants.lock().unwrap();
            let created = !participants.contains_key(id);
            let entry = participants
                .entry(id.clone())
                .or_insert_with(|| Participant::new(id.clone(), display_name));
            entry.display_name = display_name.to_string();
            Ok(Registration {
                participant: entry.clone(),
                created,
            })
        }

        async fn list_participants(
            &self,
            order: ParticipantOrder,
        ) -> Result<Vec<Participant>, CollaboratorError> {
            let mut list: Vec<_> = self.participants.lock().unwrap().values().cloned().collect();
            order.sort(&mut list);
            Ok(list)
        }

        async fn apply(&self, updates: &[ParticipantUpdate]) -> Result<(), CollaboratorError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(CollaboratorError::Unavailable("registry offline".into()));
            }
            let mut participants = self.participants.lock().unwrap();
            for update in updates {
                if let Some(p) = participants.get_mut(update.participant_id()) {
                    update.apply_to(p);
                }
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockArchive {
        records: StdMutex<Vec<SeasonRecord>>,
    }

    #[async_trait]
    impl SeasonArchive for MockArchive {
        async fn record_season(&self, record: &SeasonRecord) -> Result<(), CollaboratorError> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }

        async fn latest_season_number(&self) -> Result<Option<u32>, CollaboratorError> {
            Ok(self.records.lock().unwrap().iter().map(|r| r.season_number).max())
        }
    }

    #[derive(Default)]
    struct RecordingAnnouncer {
        lines: StdMutex<Vec<(String, Option<Duration>)>>,
    }

    impl Announcer for RecordingAnnouncer {
        fn announce(&self, text: &str) {
            self.lines.lock().unwrap().push((text.to_string(), None));
        }

        fn announce_after_delay(&self, text: &str, delay: Duration) {
            self.lines.lock().unwrap().push((text.to_string(), Some(delay)));
        }
    }

    struct Fixture {
        service: SeasonService,
        registry: Arc<MockRegistry>,
        archive: Arc<MockArchive>,
        announcer: Arc<RecordingAnnouncer>,
        host: Actor,
    }

    async fn fixture(players: &[&str]) -> Fixture {
        let config = SeasonConfig::new()
            .with_operator("host")
            .with_reveal_delay(Duration::from_millis(500))
            .with_competition(
                "trivia",
                CompetitionConfig::new("Paris", Duration::from_secs(60)).with_points(2),
            );
        let registry = Arc::new(MockRegistry::default());
        let archive = Arc::new(MockArchive::default());
        let announcer = Arc::new(RecordingAnnouncer::default());
        let service = SeasonService::new(
            config,
            registry.clone(),
            archive.clone(),
            announcer.clone(),
        );
        for id in players {
            service
                .handle(&Actor::player(*id), Intent::Register { display_name: None })
                .await
                .unwrap();
        }
        Fixture {
            service,
            registry,
            archive,
            announcer,
            host: Actor::operator("host"),
        }
    }

    fn pid(s: &str) -> ParticipantId {
        ParticipantId::new(s)
    }

    #[tokio::test]
    async fn test_operator_check_precedes_phase() {
        let f = fixture(&["p1"]).await;
        let err = f
            .service
            .handle(&Actor::player("p1"), Intent::EndVoting)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ReasonCode::Unauthorized);
        assert_eq!(err.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_register_twice_keeps_counters() {
        let f = fixture(&["p1"]).await;
        f.registry
            .increment_counter(&pid("p1"), showrunner_domain::Counter::Points, 4)
            .await
            .unwrap();

        let outcome = f
            .service
            .handle(
                &Actor::player("p1"),
                Intent::Register {
                    display_name: Some("Pat".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Registered {
                participant: pid("p1"),
                created: false
            }
        );
        let p = f.registry.get_participant(&pid("p1")).await.unwrap().unwrap();
        assert_eq!(p.counters.points, 4);
        assert_eq!(p.display_name, "Pat");
    }

    #[tokio::test]
    async fn test_unknown_participant_not_found() {
        let f = fixture(&["p1"]).await;
        f.service.handle(&f.host, Intent::StartSeason).await.unwrap();
        let err = f
            .service
            .handle(&f.host, Intent::AssignRoundWinner(pid("ghost")))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ReasonCode::NotFound);
        assert_eq!(f.service.snapshot().phase, Phase::RoundCompetition);
    }

    #[tokio::test]
    async fn test_snapshot_published_on_commit() {
        let f = fixture(&["p1", "p2"]).await;
        let mut rx = f.service.subscribe();
        f.service.handle(&f.host, Intent::StartSeason).await.unwrap();
        assert!(rx.has_changed().unwrap());
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.phase, Phase::RoundCompetition);
        assert_eq!(snapshot.round, 1);
    }

    #[tokio::test]
    async fn test_registry_failure_rolls_back() {
        let f = fixture(&["p1", "p2"]).await;
        f.service.handle(&f.host, Intent::StartSeason).await.unwrap();
        let before = f.service.snapshot();

        f.registry.fail_writes.store(true, Ordering::SeqCst);
        let err = f
            .service
            .handle(&f.host, Intent::AssignRoundWinner(pid("p1")))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ReasonCode::CollaboratorUnavailable);
        assert_eq!(f.service.snapshot(), before);

        f.registry.fail_writes.store(false, Ordering::SeqCst);
        f.service
            .handle(&f.host, Intent::AssignRoundWinner(pid("p1")))
            .await
            .unwrap();
        let p1 = f.registry.get_participant(&pid("p1")).await.unwrap().unwrap();
        assert_eq!(p1.counters.round_wins, 1);
    }

    #[tokio::test]
    async fn test_dramatic_announcements_are_delayed() {
        let f = fixture(&["p1", "p2", "p3", "p4", "p5"]).await;
        let hoh = Actor::player("p1");
        f.service.handle(&f.host, Intent::StartSeason).await.unwrap();
        f.service
            .handle(&f.host, Intent::AssignRoundWinner(pid("p1")))
            .await
            .unwrap();
        f.service.handle(&hoh, Intent::Nominate(pid("p2"))).await.unwrap();
        f.service.handle(&hoh, Intent::Nominate(pid("p3"))).await.unwrap();
        f.service.handle(&f.host, Intent::StartVoting).await.unwrap();
        f.service
            .handle(&Actor::player("p4"), Intent::CastVote(pid("p3")))
            .await
            .unwrap();
        f.service.handle(&f.host, Intent::EndVoting).await.unwrap();

        let lines = f.announcer.lines.lock().unwrap();
        let (text, delay) = lines.last().unwrap();
        assert!(text.contains("evicted"));
        assert_eq!(*delay, Some(Duration::from_millis(500)));

        let p3 = f.registry.participants.lock().unwrap()[&pid("p3")].clone();
        assert!(p3.flags.get(Flag::Eliminated));
        assert!(p3.flags.get(Flag::InJury));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_awards_points() {
        let f = fixture(&["p1", "p2"]).await;
        f.service.handle(&f.host, Intent::StartSeason).await.unwrap();
        f.service
            .handle(&f.host, Intent::StartCompetition("trivia".into()))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(5)).await;
        f.service
            .handle(&Actor::player("p2"), Intent::SubmitAnswer(" paris ".into()))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_secs(60)).await;

        assert!(f.service.snapshot().competition.is_none());
        let p2 = f.registry.get_participant(&pid("p2")).await.unwrap().unwrap();
        assert_eq!(p2.counters.points, 2);
    }

    #[tokio::test]
    async fn test_unconfigured_competition_not_found() {
        let f = fixture(&["p1"]).await;
        f.service.handle(&f.host, Intent::StartSeason).await.unwrap();
        let err = f
            .service
            .handle(&f.host, Intent::StartCompetition("chess".into()))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ReasonCode::NotFound);
    }

    #[tokio::test]
    async fn test_open_continues_season_numbering() {
        let archive = Arc::new(MockArchive::default());
        archive
            .record_season(&SeasonRecord::new(7, pid("p1"), Utc::now()))
            .await
            .unwrap();

        let service = SeasonService::open(
            SeasonConfig::new(),
            Arc::new(MockRegistry::default()),
            archive,
            Arc::new(RecordingAnnouncer::default()),
        )
        .await
        .unwrap();
        assert_eq!(service.snapshot().season_number, 8);
    }

    #[tokio::test]
    async fn test_scoreboard_reads_without_lock() {
        let f = fixture(&["p1", "p2"]).await;
        f.registry
            .increment_counter(&pid("p2"), showrunner_domain::Counter::Points, 3)
            .await
            .unwrap();

        let _writes = f.service.shared.writes.lock().await;
        let _guard = f.service.shared.session.lock().await;
        let outcome = f
            .service
            .handle(&f.host, Intent::Scoreboard(ParticipantOrder::Points))
            .await
            .unwrap();
        match outcome {
            Outcome::Scoreboard { participants, .. } => {
                assert_eq!(participants[0].id, pid("p2"));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(f.archive.records.lock().unwrap().is_empty());
    }
}
