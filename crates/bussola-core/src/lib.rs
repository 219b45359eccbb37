//! # Bússola do Caos Core Library
//!
//! State and analytics core for a personal self-tracking tool: daily energy
//! and priority check-ins, small Test→Adjust→Scale experiments, and the
//! metrics derived from them. The `bussola` CLI is a thin layer over this
//! crate.
//!
//! ## Architecture
//!
//! - **Model**: [`AppData`] is the single persisted document (user, check-ins,
//!   experiments), serialized with the camelCase keys of existing documents
//! - **Operations**: pure `(&AppData, ..) -> AppData` transitions in [`ops`]
//! - **Analytics**: read-only derivations (streak, burnout, 80/20 impact,
//!   chaos correlation, heatmap, trial) in [`analytics`]
//! - **Storage**: a key-value [`BlobStore`] holding the JSON document and a
//!   TOML [`Config`]
//! - **Store**: [`Store`] applies operations, persists and notifies
//!   subscribers
//!
//! Time and ids come from the [`Clock`] and [`IdGenerator`] providers so every
//! transition is reproducible under test.

pub mod analytics;
pub mod clock;
pub mod error;
pub mod flows;
pub mod model;
pub mod navigation;
pub mod onboarding;
pub mod ops;
pub mod storage;
pub mod store;

pub use clock::{Clock, FixedClock, IdGenerator, SequentialIds, SystemClock, TimestampIdGenerator};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use flows::{EveningCheckin, MorningCheckin, MorningOutcome};
pub use model::{
    AppData, ChaosLevel, CheckinDraft, CheckinPatch, DailyCheckin, EnergyReading, Experiment,
    ExperimentDraft, ExperimentNote, ExperimentPatch, Phase, Priority, Subscription, User,
    UserPatch,
};
pub use navigation::Page;
pub use onboarding::{DayType, Diagnosis, EnergyLevel, Recommendation};
pub use storage::{AppState, BlobStore, Config, FileBlobStore, MemoryBlobStore, STATE_KEY};
pub use store::{Store, SubscriptionId};
