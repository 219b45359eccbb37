//! Loading and saving the single state document.
//!
//! The document is `{ "user": ..., "checkins": [...], "experiments": [...] }`
//! under one key. Navigation is never part of it.

use tracing::{info, warn};

use super::BlobStore;
use crate::clock::{Clock, IdGenerator};
use crate::error::Result;
use crate::model::AppData;
use crate::navigation::Page;

/// Key the state document is stored under.
pub const STATE_KEY: &str = "bussola_do_caos_state";

/// Loaded snapshot plus the page to open on.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub data: AppData,
    pub page: Page,
    /// False when the state was synthesized because nothing usable was stored.
    pub restored: bool,
}

impl AppState {
    pub fn new(data: AppData, restored: bool) -> Self {
        let page = initial_page(&data);
        Self {
            data,
            page,
            restored,
        }
    }
}

/// Onboarding until it is completed, then the dashboard.
pub fn initial_page(data: &AppData) -> Page {
    if data.user.onboarding_completed {
        Page::Dashboard
    } else {
        Page::Onboarding
    }
}

/// Read the state under `key`, or synthesize a first-run state.
///
/// A missing, unreadable or corrupt document never fails the load; the
/// problem is logged and a fresh user is created.
pub fn load(
    blobs: &dyn BlobStore,
    key: &str,
    clock: &dyn Clock,
    ids: &dyn IdGenerator,
    trial_days: i64,
) -> AppState {
    let stored = match blobs.get(key) {
        Ok(stored) => stored,
        Err(e) => {
            warn!(error = %e, key, "failed to read saved state; starting fresh");
            None
        }
    };

    if let Some(raw) = stored {
        match serde_json::from_str::<AppData>(&raw) {
            Ok(data) => {
                info!(
                    key,
                    checkins = data.checkins.len(),
                    experiments = data.experiments.len(),
                    "loaded saved state"
                );
                return AppState::new(data, true);
            }
            Err(e) => warn!(error = %e, key, "saved state is corrupt; starting fresh"),
        }
    }

    let data = AppData::fresh(ids.next_id(), clock.now(), trial_days);
    info!(user_id = %data.user.id, "created new user");
    AppState::new(data, false)
}

/// Serialize `data` under `key`.
pub fn save(blobs: &dyn BlobStore, key: &str, data: &AppData) -> Result<()> {
    let raw = serde_json::to_string(data)?;
    blobs.set(key, &raw)?;
    Ok(())
}

/// Drop the stored document; the next [`load`] starts fresh.
pub fn reset(blobs: &dyn BlobStore, key: &str) -> Result<()> {
    blobs.remove(key)?;
    info!(key, "state reset");
    Ok(())
}
