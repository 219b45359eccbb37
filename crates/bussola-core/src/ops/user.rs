//! User mutations.

use crate::model::{AppData, UserPatch};

pub fn complete_onboarding(data: &AppData) -> AppData {
    let mut next = data.clone();
    next.user.onboarding_completed = true;
    next
}

/// Overwrite subscription / trial end. Only dev tooling calls this.
pub fn update_user(data: &AppData, patch: &UserPatch) -> AppData {
    let mut next = data.clone();
    if let Some(subscription) = patch.subscription {
        next.user.subscription = subscription;
    }
    if let Some(trial_ends_at) = patch.trial_ends_at {
        next.user.trial_ends_at = trial_ends_at;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Subscription;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn onboarding_flag_flips() {
        let data = AppData::fresh("u", Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(), 7);
        let next = complete_onboarding(&data);
        assert!(next.user.onboarding_completed);
        assert!(!data.user.onboarding_completed);
    }

    #[test]
    fn patch_leaves_identity_alone() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let data = AppData::fresh("u", now, 7);
        let next = update_user(
            &data,
            &UserPatch {
                subscription: Some(Subscription::Premium),
                trial_ends_at: Some(now - Duration::days(10)),
            },
        );
        assert_eq!(next.user.id, "u");
        assert_eq!(next.user.created_at, now);
        assert_eq!(next.user.subscription, Subscription::Premium);
        assert_eq!(next.user.trial_ends_at, now - Duration::days(10));
    }
}
