//! Consecutive-day streaks and the badges derived from them.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::model::DailyCheckin;

/// Streak length that earns the "calibrated compass" badge.
pub const CALIBRATED_COMPASS_DAYS: u32 = 7;

/// Number of most recent check-ins inspected for the consistent-energy badge.
pub const CONSISTENT_ENERGY_WINDOW: usize = 3;

/// Minimum rounded morning average for the consistent-energy badge.
pub const CONSISTENT_ENERGY_FLOOR: u8 = 3;

/// The check-in recorded for `today`, if any.
pub fn today_checkin(checkins: &[DailyCheckin], today: NaiveDate) -> Option<&DailyCheckin> {
    checkins.iter().find(|c| c.date == today)
}

/// Length of the unbroken run of check-in days ending at today or yesterday.
///
/// A run whose latest day is older than yesterday counts as broken (0).
pub fn streak(checkins: &[DailyCheckin], today: NaiveDate) -> u32 {
    let dates: BTreeSet<NaiveDate> = checkins.iter().map(|c| c.date).collect();
    let Some(&latest) = dates.iter().next_back() else {
        return 0;
    };
    let yesterday = today - Duration::days(1);
    if latest != today && latest != yesterday {
        return 0;
    }

    let mut count = 0;
    let mut expected = latest;
    for &date in dates.iter().rev() {
        if date != expected {
            break;
        }
        count += 1;
        expected -= Duration::days(1);
    }
    count
}

/// True when the three most recent check-ins all averaged at least 3.
pub fn has_consistent_energy(checkins: &[DailyCheckin]) -> bool {
    if checkins.len() < CONSISTENT_ENERGY_WINDOW {
        return false;
    }
    let mut recent: Vec<&DailyCheckin> = checkins.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent
        .iter()
        .take(CONSISTENT_ENERGY_WINDOW)
        .all(|c| c.rounded_morning_average() >= CONSISTENT_ENERGY_FLOOR)
}

pub fn has_calibrated_compass(streak: u32) -> bool {
    streak >= CALIBRATED_COMPASS_DAYS
}

/// Dashboard badge state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badges {
    pub streak: u32,
    pub consistent_energy: bool,
    pub calibrated_compass: bool,
}

pub fn badges(checkins: &[DailyCheckin], today: NaiveDate) -> Badges {
    let streak = streak(checkins, today);
    Badges {
        streak,
        consistent_energy: has_consistent_energy(checkins),
        calibrated_compass: has_calibrated_compass(streak),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::checkin_on;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn days_ago(n: i64) -> NaiveDate {
        today() - Duration::days(n)
    }

    fn with_dates(offsets: &[i64]) -> Vec<DailyCheckin> {
        offsets.iter().map(|&n| checkin_on(days_ago(n), 3)).collect()
    }

    #[test]
    fn empty_history_has_no_streak() {
        assert_eq!(streak(&[], today()), 0);
    }

    #[test]
    fn three_days_ending_today() {
        assert_eq!(streak(&with_dates(&[0, 1, 2]), today()), 3);
    }

    #[test]
    fn stale_history_breaks_streak() {
        assert_eq!(streak(&with_dates(&[2, 3]), today()), 0);
    }

    #[test]
    fn streak_may_end_yesterday() {
        assert_eq!(streak(&with_dates(&[1, 3]), today()), 1);
        assert_eq!(streak(&with_dates(&[1, 2]), today()), 2);
    }

    #[test]
    fn duplicate_dates_count_once_and_order_is_irrelevant() {
        assert_eq!(streak(&with_dates(&[2, 0, 1, 1, 0]), today()), 3);
    }

    #[test]
    fn future_dates_do_not_count() {
        assert_eq!(streak(&with_dates(&[-1, 0]), today()), 0);
    }

    #[test]
    fn consistent_energy_looks_at_latest_three() {
        let mut checkins = vec![
            checkin_on(days_ago(0), 3),
            checkin_on(days_ago(1), 4),
            checkin_on(days_ago(2), 3),
        ];
        assert!(has_consistent_energy(&checkins));

        // an old low day is outside the window
        checkins.push(checkin_on(days_ago(9), 1));
        assert!(has_consistent_energy(&checkins));

        checkins[0] = checkin_on(days_ago(0), 2);
        assert!(!has_consistent_energy(&checkins));
    }

    #[test]
    fn consistent_energy_needs_three_checkins() {
        let checkins = vec![checkin_on(days_ago(0), 5), checkin_on(days_ago(1), 5)];
        assert!(!has_consistent_energy(&checkins));
    }

    #[test]
    fn compass_badge_after_a_week() {
        let week: Vec<i64> = (0..7).collect();
        let b = badges(&with_dates(&week), today());
        assert_eq!(b.streak, 7);
        assert!(b.calibrated_compass);
        assert!(!has_calibrated_compass(6));
    }
}
