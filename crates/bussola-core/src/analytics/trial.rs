//! Trial countdown and premium gating.

use chrono::{DateTime, Utc};

use crate::model::{AppData, User};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole days of trial left, rounding partial days up. Never negative.
pub fn trial_days_left(user: &User, now: DateTime<Utc>) -> i64 {
    let remaining = (user.trial_ends_at - now).num_milliseconds();
    if remaining <= 0 {
        return 0;
    }
    (remaining + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// Premium subscribers and users still inside the trial get premium features.
pub fn is_premium(user: &User, now: DateTime<Utc>) -> bool {
    user.is_premium_subscriber() || trial_days_left(user, now) > 0
}

/// Whether a new experiment may start: premium users are unbounded, everyone
/// else may run at most `free_limit` unfinished experiments.
pub fn can_add_experiment(data: &AppData, now: DateTime<Utc>, free_limit: usize) -> bool {
    is_premium(&data.user, now) || data.active_experiments().count() < free_limit
}
