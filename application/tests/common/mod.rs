//! Shared fakes for the season scenario tests

#![allow(dead_code)]

use async_trait::async_trait;
use showrunner_application::{
    Announcer, CollaboratorError, CompetitionConfig, Intent, PlayerRegistry, Registration,
    SeasonArchive, SeasonConfig, SeasonService,
};
use showrunner_domain::{
    Actor, Outcome, Participant, ParticipantId, ParticipantOrder, ParticipantUpdate, SeasonRecord,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// Parks the next registry write until released
#[derive(Clone, Default)]
pub struct WriteGate {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

#[derive(Default)]
pub struct FakeRegistry {
    pub participants: Mutex<BTreeMap<ParticipantId, Participant>>,
    pub fail_writes: AtomicBool,
    pub gate: Mutex<Option<WriteGate>>,
}

impl FakeRegistry {
    pub fn participant(&self, id: &str) -> Participant {
        self.participants.lock().unwrap()[&ParticipantId::new(id)].clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_writes.store(failing, Ordering::SeqCst);
    }

    /// Hold the next `apply` call until `release` is notified
    pub fn hold_next_write(&self) -> WriteGate {
        let gate = WriteGate::default();
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }
}

#[async_trait]
impl PlayerRegistry for FakeRegistry {
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
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
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
pub struct FakeArchive {
    pub records: Mutex<Vec<SeasonRecord>>,
    pub fail_writes: AtomicBool,
}

#[async_trait]
impl SeasonArchive for FakeArchive {
    async fn record_season(&self, record: &SeasonRecord) -> Result<(), CollaboratorError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CollaboratorError::Unavailable("archive offline".into()));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn latest_season_number(&self) -> Result<Option<u32>, CollaboratorError> {
        Ok(self.records.lock().unwrap().iter().map(|r| r.season_number).max())
    }
}

#[derive(Default)]
pub struct RecordingAnnouncer {
    pub lines: Mutex<Vec<String>>,
}

impl RecordingAnnouncer {
    pub fn count_containing(&self, needle: &str) -> usize {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.contains(needle))
            .count()
    }
}

impl Announcer for RecordingAnnouncer {
    fn announce(&self, text: &str) {
        self.lines.lock().unwrap().push(text.to_string());
    }

    fn announce_after_delay(&self, text: &str, _delay: Duration) {
        self.lines.lock().unwrap().push(text.to_string());
    }
}

pub struct Harness {
    pub service: SeasonService,
    pub registry: Arc<FakeRegistry>,
    pub archive: Arc<FakeArchive>,
    pub announcer: Arc<RecordingAnnouncer>,
    pub host: Actor,
}

impl Harness {
    pub async fn with_players(players: &[&str]) -> Self {
        let config = SeasonConfig::new()
            .with_operator("host")
            .with_reveal_delay(Duration::ZERO)
            .with_competition(
                "trivia",
                CompetitionConfig::new("Paris", Duration::from_secs(60)).with_points(1),
            );
        let registry = Arc::new(FakeRegistry::default());
        let archive = Arc::new(FakeArchive::default());
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
        Self {
            service,
            registry,
            archive,
            announcer,
            host: Actor::operator("host"),
        }
    }

    pub async fn host(&self, intent: Intent) -> Outcome {
        self.service.handle(&self.host, intent).await.unwrap()
    }

    pub async fn player(&self, id: &str, intent: Intent) -> Outcome {
        self.service
            .handle(&Actor::player(id), intent)
            .await
            .unwrap()
    }
}

pub fn pid(s: &str) -> ParticipantId {
    ParticipantId::new(s)
}
