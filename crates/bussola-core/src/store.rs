//! The application store.
//!
//! [`Store`] owns the current [`AppData`] snapshot behind an `Arc`. Every
//! mutation runs a pure operation from [`crate::ops`], swaps the snapshot,
//! persists it and notifies subscribers. Readers holding an older `Arc` keep a
//! consistent view.
//!
//! Checked methods validate input and enforce the configured limits before
//! touching state; a rejected call leaves the snapshot untouched. Persistence
//! failures do not roll a mutation back: the in-memory snapshot stays
//! authoritative and the failure is logged and kept in
//! [`Store::last_save_error`].

use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::analytics;
use crate::clock::{Clock, IdGenerator, SystemClock, TimestampIdGenerator};
use crate::error::{CoreError, Result, ValidationError};
use crate::flows::{self, EveningCheckin, MorningCheckin, MorningOutcome};
use crate::model::{
    AppData, CheckinDraft, CheckinPatch, DailyCheckin, Experiment, ExperimentDraft,
    ExperimentPatch, Priority, UserPatch,
};
use crate::navigation::Page;
use crate::onboarding::Diagnosis;
use crate::ops;
use crate::storage::{self, BlobStore, Config, FileBlobStore};

/// Callback run after each committed mutation.
pub type Subscriber = Box<dyn Fn(&AppData)>;

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct Store {
    data: Arc<AppData>,
    page: Page,
    blobs: Box<dyn BlobStore>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    config: Config,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    last_save_error: Option<String>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("page", &self.page)
            .field("user", &self.data.user.id)
            .field("checkins", &self.data.checkins.len())
            .field("experiments", &self.data.experiments.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Store {
    /// Load state from `blobs` (or start fresh) and pick the opening page.
    pub fn open(
        blobs: Box<dyn BlobStore>,
        clock: Box<dyn Clock>,
        ids: Box<dyn IdGenerator>,
        config: Config,
    ) -> Self {
        let state = storage::load(
            blobs.as_ref(),
            &config.storage.state_key,
            clock.as_ref(),
            ids.as_ref(),
            config.trial.trial_days,
        );
        let mut store = Self {
            data: Arc::new(state.data),
            page: state.page,
            blobs,
            clock,
            ids,
            config,
            subscribers: Vec::new(),
            next_subscription: 0,
            last_save_error: None,
        };
        if !state.restored {
            store.persist();
        }
        store
    }

    /// Store over the data directory with the system clock.
    pub fn open_default(config: Config) -> Result<Self> {
        let blobs = FileBlobStore::in_data_dir()?;
        Ok(Self::open(
            Box::new(blobs),
            Box::new(SystemClock),
            Box::new(TimestampIdGenerator::new()),
            config,
        ))
    }

    // ── reads ──────────────────────────────────────────────────────────

    /// Shared handle to the current snapshot.
    pub fn snapshot(&self) -> Arc<AppData> {
        Arc::clone(&self.data)
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    pub fn today_checkin(&self) -> Option<&DailyCheckin> {
        analytics::today_checkin(&self.data.checkins, self.today())
    }

    pub fn trial_days_left(&self) -> i64 {
        analytics::trial_days_left(&self.data.user, self.now())
    }

    pub fn is_premium(&self) -> bool {
        analytics::is_premium(&self.data.user, self.now())
    }

    pub fn can_add_experiment(&self) -> bool {
        analytics::can_add_experiment(
            &self.data,
            self.now(),
            self.config.limits.free_experiment_limit,
        )
    }

    // ── navigation ─────────────────────────────────────────────────────

    pub fn set_page(&mut self, page: Page) {
        debug!(from = %self.page, to = %page, "navigate");
        self.page = page;
    }

    /// Navigate by name; unknown names open the dashboard.
    pub fn navigate(&mut self, name: &str) -> Page {
        let page = Page::parse(name);
        self.set_page(page);
        page
    }

    // ── subscriptions ──────────────────────────────────────────────────

    pub fn subscribe(&mut self, callback: impl Fn(&AppData) + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    // ── persistence ────────────────────────────────────────────────────

    /// Write the current snapshot.
    pub fn save(&self) -> Result<()> {
        storage::save(self.blobs.as_ref(), &self.config.storage.state_key, &self.data)
    }

    fn persist(&mut self) {
        match self.save() {
            Ok(()) => self.last_save_error = None,
            Err(e) => {
                warn!(error = %e, "failed to persist state");
                self.last_save_error = Some(e.to_string());
            }
        }
    }

    /// Swap in `next`, persist and notify. Unchanged snapshots are dropped.
    fn commit(&mut self, next: AppData, action: &str) -> bool {
        if next == *self.data {
            debug!(action, "mutation left state unchanged");
            return false;
        }
        self.data = Arc::new(next);
        debug!(action, "state committed");
        self.persist();
        for (_, subscriber) in &self.subscribers {
            subscriber(&self.data);
        }
        true
    }

    /// Forget everything and start over as a new user.
    pub fn reset(&mut self) -> Result<()> {
        storage::reset(self.blobs.as_ref(), &self.config.storage.state_key)?;
        let fresh = AppData::fresh(self.ids.next_id(), self.now(), self.config.trial.trial_days);
        info!(user_id = %fresh.user.id, "all data reset");
        self.data = Arc::new(fresh);
        self.page = Page::Onboarding;
        self.persist();
        for (_, subscriber) in &self.subscribers {
            subscriber(&self.data);
        }
        Ok(())
    }

    // ── lookups used by checked methods ────────────────────────────────

    fn require_checkin(&self, id: &str) -> Result<&DailyCheckin> {
        self.data
            .checkin(id)
            .ok_or_else(|| CoreError::not_found("checkin", id))
    }

    fn require_priority(&self, checkin_id: &str, priority_id: &str) -> Result<&Priority> {
        self.require_checkin(checkin_id)?
            .find_priority(priority_id)
            .ok_or_else(|| CoreError::not_found("priority", priority_id))
    }

    fn require_experiment(&self, id: &str) -> Result<&Experiment> {
        self.data
            .experiment(id)
            .ok_or_else(|| CoreError::not_found("experiment", id))
    }

    fn require_text(field: &str, text: &str) -> Result<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyText(field.to_string()).into());
        }
        Ok(trimmed.to_string())
    }

    // ── check-ins ──────────────────────────────────────────────────────

    /// Insert a check-in. Returns the id of the check-in stored for
    /// `draft.date`, which is the existing one when that date is taken.
    pub fn add_checkin(&mut self, draft: CheckinDraft) -> Result<String> {
        let max = self.config.limits.max_priorities;
        if draft.prioridades.len() > max {
            return Err(CoreError::cap_exceeded("priorities", max));
        }
        if draft.prioridades.iter().any(|p| p.text.trim().is_empty()) {
            return Err(ValidationError::EmptyText("prioridades".to_string()).into());
        }
        let date = draft.date;
        let id = self.ids.next_id();
        let next = ops::add_checkin(&self.data, draft, id);
        self.commit(next, "add_checkin");
        let stored = self
            .data
            .checkin_on(date)
            .ok_or_else(|| CoreError::not_found("checkin", date.to_string()))?;
        Ok(stored.id.clone())
    }

    pub fn update_checkin(&mut self, id: &str, patch: &CheckinPatch) -> Result<()> {
        self.require_checkin(id)?;
        if let Some(prioridades) = &patch.prioridades {
            let max = self.config.limits.max_priorities;
            if prioridades.len() > max {
                return Err(CoreError::cap_exceeded("priorities", max));
            }
        }
        let next = ops::update_checkin(&self.data, id, patch);
        self.commit(next, "update_checkin");
        Ok(())
    }

    /// Flip a priority and return its new completion state.
    pub fn toggle_priority(&mut self, checkin_id: &str, priority_id: &str) -> Result<bool> {
        let completed = !self.require_priority(checkin_id, priority_id)?.completed;
        let next = ops::toggle_priority(&self.data, checkin_id, priority_id);
        self.commit(next, "toggle_priority");
        Ok(completed)
    }

    pub fn edit_priority(&mut self, checkin_id: &str, priority_id: &str, text: &str) -> Result<()> {
        self.require_priority(checkin_id, priority_id)?;
        let text = Self::require_text("text", text)?;
        let next = ops::edit_priority(&self.data, checkin_id, priority_id, &text);
        self.commit(next, "edit_priority");
        Ok(())
    }

    /// Append a priority, respecting `limits.max_priorities`.
    pub fn add_priority(&mut self, checkin_id: &str, text: &str) -> Result<String> {
        let max = self.config.limits.max_priorities;
        if self.require_checkin(checkin_id)?.prioridades.len() >= max {
            return Err(CoreError::cap_exceeded("priorities", max));
        }
        let text = Self::require_text("text", text)?;
        let id = self.ids.next_id();
        let priority = Priority::new(id.clone(), text, self.now());
        let next = ops::add_priority(&self.data, checkin_id, priority);
        self.commit(next, "add_priority");
        Ok(id)
    }

    pub fn remove_priority(&mut self, checkin_id: &str, priority_id: &str) -> Result<()> {
        self.require_priority(checkin_id, priority_id)?;
        let next = ops::remove_priority(&self.data, checkin_id, priority_id);
        self.commit(next, "remove_priority");
        Ok(())
    }

    pub fn reorder_priorities(&mut self, checkin_id: &str, from: usize, to: usize) -> Result<()> {
        let len = self.require_checkin(checkin_id)?.prioridades.len();
        if from >= len || to >= len {
            return Err(ValidationError::InvalidValue {
                field: "index".to_string(),
                message: format!("positions must be below {len}"),
            }
            .into());
        }
        let next = ops::reorder_priorities(&self.data, checkin_id, from, to);
        self.commit(next, "reorder_priorities");
        Ok(())
    }

    /// Morning form; afterwards the dashboard is shown.
    pub fn submit_morning(&mut self, input: &MorningCheckin) -> Result<MorningOutcome> {
        let (next, outcome) = flows::submit_morning(
            &self.data,
            input,
            self.today(),
            self.now(),
            self.ids.as_ref(),
            self.config.limits.max_priorities,
        )?;
        self.commit(next, "submit_morning");
        self.set_page(Page::Dashboard);
        Ok(outcome)
    }

    /// Evening form; afterwards the evolution page is shown.
    pub fn submit_evening(&mut self, input: &EveningCheckin) -> Result<()> {
        let next = flows::submit_evening(
            &self.data,
            input,
            self.today(),
            self.config.limits.max_priorities,
        )?;
        self.commit(next, "submit_evening");
        self.set_page(Page::Evolution);
        Ok(())
    }

    // ── experiments ────────────────────────────────────────────────────

    /// Start an experiment. Free users past the trial get
    /// `limits.free_experiment_limit` active experiments.
    pub fn add_experiment(&mut self, draft: ExperimentDraft) -> Result<String> {
        let nome = Self::require_text("nome", &draft.nome)?;
        let hipotese = Self::require_text("hipotese", &draft.hipotese)?;
        if draft.duracao == 0 {
            return Err(ValidationError::InvalidValue {
                field: "duracao".to_string(),
                message: "must be at least one day".to_string(),
            }
            .into());
        }
        if !self.can_add_experiment() {
            return Err(CoreError::cap_exceeded(
                "active experiments",
                self.config.limits.free_experiment_limit,
            ));
        }
        let id = self.ids.next_id();
        let draft = ExperimentDraft {
            nome,
            hipotese,
            ..draft
        };
        let next = ops::add_experiment(&self.data, draft, id.clone(), self.now());
        self.commit(next, "add_experiment");
        Ok(id)
    }

    pub fn update_experiment(&mut self, id: &str, patch: &ExperimentPatch) -> Result<()> {
        self.require_experiment(id)?;
        let next = ops::update_experiment(&self.data, id, patch);
        self.commit(next, "update_experiment");
        Ok(())
    }

    pub fn edit_experiment(&mut self, id: &str, nome: &str, hipotese: &str, duracao: u32) -> Result<()> {
        self.require_experiment(id)?;
        Self::require_text("nome", nome)?;
        Self::require_text("hipotese", hipotese)?;
        if duracao == 0 {
            return Err(ValidationError::InvalidValue {
                field: "duracao".to_string(),
                message: "must be at least one day".to_string(),
            }
            .into());
        }
        let next = ops::edit_experiment(&self.data, id, nome, hipotese, duracao);
        self.commit(next, "edit_experiment");
        Ok(())
    }

    pub fn remove_experiment(&mut self, id: &str) -> Result<()> {
        self.require_experiment(id)?;
        let next = ops::remove_experiment(&self.data, id);
        self.commit(next, "remove_experiment");
        Ok(())
    }

    /// Returns whether the phase moved.
    pub fn advance_phase(&mut self, id: &str) -> Result<bool> {
        self.require_experiment(id)?;
        let next = ops::advance_phase(&self.data, id);
        Ok(self.commit(next, "advance_phase"))
    }

    pub fn add_note(&mut self, id: &str, texto: &str) -> Result<String> {
        self.require_experiment(id)?;
        Self::require_text("texto", texto)?;
        let note_id = self.ids.next_id();
        let next = ops::add_note(&self.data, id, note_id.clone(), texto, self.now());
        self.commit(next, "add_note");
        Ok(note_id)
    }

    /// Returns false when the experiment was already finished.
    pub fn finalize_experiment(
        &mut self,
        id: &str,
        resultado: &str,
        proximos_passos: &str,
    ) -> Result<bool> {
        self.require_experiment(id)?;
        let next = ops::finalize_experiment(&self.data, id, resultado, proximos_passos, self.now());
        Ok(self.commit(next, "finalize_experiment"))
    }

    // ── user ───────────────────────────────────────────────────────────

    pub fn complete_onboarding(&mut self) {
        let next = ops::complete_onboarding(&self.data);
        self.commit(next, "complete_onboarding");
    }

    /// Dev tooling: flip the subscription or move the trial end.
    pub fn update_user(&mut self, patch: &UserPatch) {
        let next = ops::update_user(&self.data, patch);
        self.commit(next, "update_user");
    }

    /// Record the wizard's first check-in, mark onboarding done and open the
    /// dashboard. When today already has a check-in it is kept and the
    /// outcome reports `created: false`.
    pub fn finish_onboarding(
        &mut self,
        diagnosis: &Diagnosis,
        priorities: &[String],
    ) -> Result<MorningOutcome> {
        let max = self.config.limits.max_priorities;
        let draft =
            diagnosis.initial_checkin(priorities, self.today(), self.ids.as_ref(), self.now())?;
        if draft.prioridades.len() > max {
            return Err(CoreError::cap_exceeded("priorities", max));
        }
        let date = draft.date;
        let created = self.data.checkin_on(date).is_none();
        let id = self.ids.next_id();
        let with_checkin = ops::add_checkin(&self.data, draft, id);
        let next = ops::complete_onboarding(&with_checkin);
        self.commit(next, "finish_onboarding");
        self.set_page(Page::Dashboard);
        let stored = self
            .data
            .checkin_on(date)
            .ok_or_else(|| CoreError::not_found("checkin", date.to_string()))?;
        Ok(MorningOutcome {
            checkin_id: stored.id.clone(),
            created,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedClock, SequentialIds};
    use crate::model::{ChaosLevel, EnergyReading};
    use crate::storage::MemoryBlobStore;
    use chrono::TimeZone;
    use std::cell::Cell;
    use std::rc::Rc;

    fn store_with(blobs: MemoryBlobStore) -> Store {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 9, 1, 8, 0, 0).unwrap());
        Store::open(
            Box::new(blobs),
            Box::new(clock),
            Box::new(SequentialIds::new("id")),
            Config::default(),
        )
    }

    fn morning(priorities: &[&str]) -> MorningCheckin {
        MorningCheckin {
            energy: EnergyReading::uniform(3).unwrap(),
            nivel_caos: ChaosLevel::Medio,
            priorities: priorities.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn fresh_store_starts_on_onboarding_and_persists_user() {
        let blobs = MemoryBlobStore::new();
        let store = store_with(blobs.clone());
        assert_eq!(store.page(), Page::Onboarding);
        assert_eq!(store.trial_days_left(), 7);
        assert!(store.is_premium());
        assert!(!blobs.is_empty());
    }

    #[test]
    fn subscribers_see_each_commit() {
        let mut store = store_with(MemoryBlobStore::new());
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let sub = store.subscribe(move |_| seen.set(seen.get() + 1));

        store.submit_morning(&morning(&["a"])).unwrap();
        store.complete_onboarding();
        store.complete_onboarding();
        assert_eq!(calls.get(), 2);

        assert!(store.unsubscribe(sub));
        store.navigate("settings");
        store.submit_morning(&morning(&["b"])).unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn old_snapshots_stay_intact() {
        let mut store = store_with(MemoryBlobStore::new());
        let before = store.snapshot();
        store.submit_morning(&morning(&["a"])).unwrap();
        assert!(before.checkins.is_empty());
        assert_eq!(store.data().checkins.len(), 1);
    }

    #[test]
    fn priority_cap_is_enforced() {
        let mut store = store_with(MemoryBlobStore::new());
        let id = store.submit_morning(&morning(&["a", "b", "c"])).unwrap().checkin_id;
        assert!(matches!(
            store.add_priority(&id, "d"),
            Err(CoreError::CapExceeded { limit: 3, .. })
        ));
        let first = store.data().checkins[0].prioridades[0].id.clone();
        store.remove_priority(&id, &first).unwrap();
        store.add_priority(&id, "d").unwrap();
        assert_eq!(store.today_checkin().unwrap().prioridades.len(), 3);
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut store = store_with(MemoryBlobStore::new());
        assert!(matches!(
            store.toggle_priority("nope", "p"),
            Err(CoreError::NotFound { .. })
        ));
        assert!(matches!(store.advance_phase("nope"), Err(CoreError::NotFound { .. })));
    }

    #[test]
    fn navigation_falls_back_to_dashboard() {
        let mut store = store_with(MemoryBlobStore::new());
        assert_eq!(store.navigate("experiments"), Page::Experiments);
        assert_eq!(store.navigate("nowhere"), Page::Dashboard);
    }

    #[test]
    fn onboarding_keeps_an_existing_checkin() {
        let mut store = store_with(MemoryBlobStore::new());
        let first = store.submit_morning(&morning(&["a"])).unwrap();

        let diagnosis = Diagnosis::new(
            crate::onboarding::EnergyLevel::Ok,
            crate::onboarding::DayType::MeioTermo,
            "",
        );
        let outcome = store.finish_onboarding(&diagnosis, &["b".to_string()]).unwrap();
        assert!(!outcome.created);
        assert_eq!(outcome.checkin_id, first.checkin_id);
        assert!(store.data().user.onboarding_completed);
        assert_eq!(store.today_checkin().unwrap().prioridades[0].text, "a");
    }

    #[test]
    fn out_of_range_trial_days_fall_back_to_default() {
        let mut config = Config::default();
        config.trial.trial_days = 200_000_000_000_000;
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 9, 1, 8, 0, 0).unwrap());
        let mut store = Store::open(
            Box::new(MemoryBlobStore::new()),
            Box::new(clock),
            Box::new(SequentialIds::new("id")),
            config,
        );
        assert_eq!(store.trial_days_left(), crate::model::DEFAULT_TRIAL_DAYS);

        store.reset().unwrap();
        assert_eq!(store.trial_days_left(), crate::model::DEFAULT_TRIAL_DAYS);
    }

    #[test]
    fn reset_starts_a_new_user() {
        let blobs = MemoryBlobStore::new();
        let mut store = store_with(blobs.clone());
        store.submit_morning(&morning(&["a"])).unwrap();
        let old_user = store.data().user.id.clone();

        store.reset().unwrap();
        assert_ne!(store.data().user.id, old_user);
        assert!(store.data().checkins.is_empty());
        assert_eq!(store.page(), Page::Onboarding);

        let reopened = store_with(blobs);
        assert_eq!(reopened.data().user.id, store.data().user.id);
    }
}
