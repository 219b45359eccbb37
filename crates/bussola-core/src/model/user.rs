//! The single local user and their subscription state.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Length of the free trial granted on first run.
pub const DEFAULT_TRIAL_DAYS: i64 = 7;

/// Longest trial the config and dev tooling accept, in either direction.
pub const MAX_TRIAL_DAYS: i64 = 36_500;

/// `now + days`, or `None` when the result falls outside chrono's range.
pub fn trial_end(now: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    TimeDelta::try_days(days).and_then(|delta| now.checked_add_signed(delta))
}

/// Subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Subscription {
    #[default]
    Free,
    Premium,
}

impl std::fmt::Display for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subscription::Free => write!(f, "free"),
            Subscription::Premium => write!(f, "premium"),
        }
    }
}

impl std::str::FromStr for Subscription {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Subscription::Free),
            "premium" => Ok(Subscription::Premium),
            other => Err(format!("unknown subscription '{other}', expected free|premium")),
        }
    }
}

/// One user per installation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub onboarding_completed: bool,
    pub subscription: Subscription,
    pub trial_ends_at: DateTime<Utc>,
}

impl User {
    /// First-run user: free tier with a trial of `trial_days` from `now`.
    ///
    /// A trial length that overflows the calendar falls back to
    /// [`DEFAULT_TRIAL_DAYS`].
    pub fn new(id: impl Into<String>, now: DateTime<Utc>, trial_days: i64) -> Self {
        let trial_ends_at = trial_end(now, trial_days).unwrap_or_else(|| {
            warn!(trial_days, "trial length out of range; using default");
            now + TimeDelta::days(DEFAULT_TRIAL_DAYS)
        });
        Self {
            id: id.into(),
            created_at: now,
            onboarding_completed: false,
            subscription: Subscription::Free,
            trial_ends_at,
        }
    }

    pub fn is_premium_subscriber(&self) -> bool {
        self.subscription == Subscription::Premium
    }
}

/// Fields dev tooling may overwrite on the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub subscription: Option<Subscription>,
    pub trial_ends_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn new_user_gets_a_week_of_trial() {
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
        let user = User::new("u1", now, DEFAULT_TRIAL_DAYS);
        assert!(!user.onboarding_completed);
        assert_eq!(user.subscription, Subscription::Free);
        assert_eq!(user.trial_ends_at, now + Duration::days(7));
    }

    #[test]
    fn oversized_trial_falls_back_to_default() {
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
        let user = User::new("u1", now, 200_000_000_000_000);
        assert_eq!(user.trial_ends_at, now + Duration::days(DEFAULT_TRIAL_DAYS));
        assert!(trial_end(now, 100_000_000).is_none());
        assert_eq!(trial_end(now, -1), Some(now - Duration::days(1)));
    }

    #[test]
    fn user_serializes_with_camel_case_keys() {
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
        let json = serde_json::to_value(User::new("u1", now, 7)).unwrap();
        assert_eq!(json["onboardingCompleted"], false);
        assert_eq!(json["subscription"], "free");
        assert!(json.get("trialEndsAt").is_some());
    }

    #[test]
    fn subscription_parses_case_insensitively() {
        assert_eq!("Premium".parse::<Subscription>(), Ok(Subscription::Premium));
        assert!("gold".parse::<Subscription>().is_err());
    }
}
