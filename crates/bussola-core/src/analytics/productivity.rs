//! Completed-task statistics: chaos correlation and the 28-day heatmap.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::{ChaosLevel, DailyCheckin};

/// Days covered by the productivity heatmap.
pub const HEATMAP_DAYS: i64 = 28;

/// How much fewer tasks get done on high-chaos days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChaosCorrelation {
    pub high_chaos_mean: f64,
    pub other_mean: f64,
    /// `(other - high) / other * 100`, rounded.
    pub drop_percent: u32,
}

fn mean_tasks<'a>(checkins: impl Iterator<Item = &'a DailyCheckin>) -> Option<f64> {
    let (sum, count) = checkins.fold((0u64, 0u64), |(sum, count), c| {
        (sum + c.tarefas_completadas as u64, count + 1)
    });
    (count > 0).then(|| sum as f64 / count as f64)
}

/// Compare completed tasks on `alto` days against all other days.
///
/// Returns `None` unless both groups exist, both means are positive and
/// high-chaos days are strictly less productive.
pub fn chaos_correlation(checkins: &[DailyCheckin]) -> Option<ChaosCorrelation> {
    let high = mean_tasks(checkins.iter().filter(|c| c.nivel_caos == ChaosLevel::Alto))?;
    let other = mean_tasks(checkins.iter().filter(|c| c.nivel_caos != ChaosLevel::Alto))?;
    if high <= 0.0 || other <= 0.0 || high >= other {
        return None;
    }
    Some(ChaosCorrelation {
        high_chaos_mean: high,
        other_mean: other,
        drop_percent: ((other - high) / other * 100.0).round() as u32,
    })
}

/// Completed tasks for each of the last 28 days, oldest first; 0 for days
/// without a check-in.
pub fn productivity_heatmap(checkins: &[DailyCheckin], today: NaiveDate) -> Vec<u32> {
    (0..HEATMAP_DAYS)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            checkins
                .iter()
                .find(|c| c.date == date)
                .map(|c| c.tarefas_completadas)
                .unwrap_or(0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::checkin_with;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn tasks(days_ago: i64, level: ChaosLevel, done: u32) -> DailyCheckin {
        let mut c = checkin_with(today() - Duration::days(days_ago), [3, 3, 3], done);
        c.nivel_caos = level;
        c
    }

    #[test]
    fn reports_drop_on_chaotic_days() {
        let checkins = vec![
            tasks(0, ChaosLevel::Alto, 1),
            tasks(1, ChaosLevel::Alto, 2),
            tasks(2, ChaosLevel::Baixo, 3),
            tasks(3, ChaosLevel::Medio, 3),
        ];
        let corr = chaos_correlation(&checkins).unwrap();
        assert_eq!(corr.high_chaos_mean, 1.5);
        assert_eq!(corr.other_mean, 3.0);
        assert_eq!(corr.drop_percent, 50);
    }

    #[test]
    fn percentage_is_rounded() {
        let checkins = vec![tasks(0, ChaosLevel::Alto, 2), tasks(1, ChaosLevel::Medio, 3)];
        assert_eq!(chaos_correlation(&checkins).unwrap().drop_percent, 33);
    }

    #[test]
    fn no_claim_without_both_groups_or_positive_means() {
        assert_eq!(chaos_correlation(&[]), None);
        assert_eq!(chaos_correlation(&[tasks(0, ChaosLevel::Alto, 1)]), None);
        assert_eq!(
            chaos_correlation(&[tasks(0, ChaosLevel::Alto, 0), tasks(1, ChaosLevel::Baixo, 3)]),
            None
        );
        assert_eq!(
            chaos_correlation(&[tasks(0, ChaosLevel::Alto, 3), tasks(1, ChaosLevel::Baixo, 2)]),
            None
        );
        assert_eq!(
            chaos_correlation(&[tasks(0, ChaosLevel::Alto, 2), tasks(1, ChaosLevel::Baixo, 2)]),
            None
        );
    }

    #[test]
    fn heatmap_is_fixed_length_oldest_first() {
        let checkins = vec![
            tasks(0, ChaosLevel::Baixo, 3),
            tasks(27, ChaosLevel::Baixo, 1),
            tasks(28, ChaosLevel::Baixo, 2),
        ];
        let map = productivity_heatmap(&checkins, today());
        assert_eq!(map.len(), 28);
        assert_eq!(map[0], 1);
        assert_eq!(map[27], 3);
        assert_eq!(map.iter().sum::<u32>(), 4);
    }
}
