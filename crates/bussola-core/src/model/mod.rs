//! Persisted state model.
//!
//! [`AppData`] is the unit of persistence: the user plus the check-in and
//! experiment collections. It is treated as an immutable value; every
//! mutation in [`crate::ops`] builds a new one.

pub mod checkin;
pub mod experiment;
pub mod user;

pub use checkin::{
    validate_energy, ChaosLevel, CheckinDraft, CheckinPatch, DailyCheckin, EnergyReading,
    Priority,
};
pub use experiment::{Experiment, ExperimentDraft, ExperimentNote, ExperimentPatch, Phase};
pub use user::{trial_end, Subscription, User, UserPatch, DEFAULT_TRIAL_DAYS, MAX_TRIAL_DAYS};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of everything that is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    pub user: User,
    #[serde(default)]
    pub checkins: Vec<DailyCheckin>,
    #[serde(default)]
    pub experiments: Vec<Experiment>,
}

impl AppData {
    /// First-run state: a new free user and empty collections.
    pub fn fresh(user_id: impl Into<String>, now: DateTime<Utc>, trial_days: i64) -> Self {
        Self {
            user: User::new(user_id, now, trial_days),
            checkins: Vec::new(),
            experiments: Vec::new(),
        }
    }

    pub fn checkin(&self, id: &str) -> Option<&DailyCheckin> {
        self.checkins.iter().find(|c| c.id == id)
    }

    pub fn checkin_on(&self, date: NaiveDate) -> Option<&DailyCheckin> {
        self.checkins.iter().find(|c| c.date == date)
    }

    pub fn experiment(&self, id: &str) -> Option<&Experiment> {
        self.experiments.iter().find(|e| e.id == id)
    }

    pub fn active_experiments(&self) -> impl Iterator<Item = &Experiment> {
        self.experiments.iter().filter(|e| e.is_active())
    }

    pub fn completed_experiments(&self) -> impl Iterator<Item = &Experiment> {
        self.experiments.iter().filter(|e| e.is_completed())
    }
}
