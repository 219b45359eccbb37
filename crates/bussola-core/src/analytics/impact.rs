//! 80/20 impact ranking of recurring priorities.
//!
//! Priorities are grouped by their case-insensitive, trimmed text. Groups the
//! user still struggles to finish rank above the ones that are always done,
//! then by completions. Ties fall back to the group's first appearance.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::clock::decode_id_timestamp;
use crate::model::{DailyCheckin, Priority};

/// Hour used when neither the priority nor its id carry a creation time.
const FALLBACK_HOUR: u32 = 12;

/// Number of groups the evolution page shows.
pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactEntry {
    /// Display text of the first occurrence.
    pub text: String,
    pub completions: u32,
    pub total: u32,
    pub first_seen: DateTime<Utc>,
}

impl ImpactEntry {
    pub fn is_fully_completed(&self) -> bool {
        self.total > 0 && self.completions == self.total
    }

    pub fn completion_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completions as f64 / self.total as f64
    }
}

/// When a priority was created.
///
/// Prefers the explicit `created_at`; older documents only encode it in the
/// id, and ids that do not decode fall back to noon of the check-in date.
pub fn priority_created_at(priority: &Priority, checkin_date: NaiveDate) -> DateTime<Utc> {
    priority
        .created_at
        .or_else(|| decode_id_timestamp(&priority.id))
        .unwrap_or_else(|| {
            let noon = NaiveTime::from_hms_opt(FALLBACK_HOUR, 0, 0).unwrap_or_default();
            checkin_date.and_time(noon).and_utc()
        })
}

fn group_key(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Full ranked list of priority groups.
pub fn impact_ranking(checkins: &[DailyCheckin]) -> Vec<ImpactEntry> {
    let mut groups: HashMap<String, ImpactEntry> = HashMap::new();

    for checkin in checkins {
        for priority in &checkin.prioridades {
            let created = priority_created_at(priority, checkin.date);
            let entry = groups
                .entry(group_key(&priority.text))
                .or_insert_with(|| ImpactEntry {
                    text: priority.text.clone(),
                    completions: 0,
                    total: 0,
                    first_seen: created,
                });
            entry.total += 1;
            if priority.completed {
                entry.completions += 1;
            }
            if created < entry.first_seen {
                entry.first_seen = created;
            }
        }
    }

    let mut ranked: Vec<ImpactEntry> = groups.into_values().collect();
    ranked.sort_by(|a, b| {
        a.is_fully_completed()
            .cmp(&b.is_fully_completed())
            .then_with(|| b.completions.cmp(&a.completions))
            .then_with(|| a.first_seen.cmp(&b.first_seen))
            .then_with(|| a.text.cmp(&b.text))
    });
    ranked
}

/// First `n` groups of [`impact_ranking`].
pub fn top_impact(checkins: &[DailyCheckin], n: usize) -> Vec<ImpactEntry> {
    let mut ranked = impact_ranking(checkins);
    ranked.truncate(n);
    ranked
}
