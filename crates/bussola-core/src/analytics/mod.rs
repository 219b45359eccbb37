//! Derived analytics over the check-in and experiment collections.
//!
//! Everything here is a pure function of the snapshot plus "today"/"now";
//! nothing is cached, callers recompute on every read.

pub mod energy;
pub mod impact;
pub mod productivity;
pub mod streak;
pub mod trial;

pub use energy::{
    burnout_alert, daily_insight, energy_series, evolution_summary, DailyInsight, DayPoint,
    EnergyBand, EvolutionSummary,
};
pub use impact::{impact_ranking, priority_created_at, top_impact, ImpactEntry};
pub use productivity::{chaos_correlation, productivity_heatmap, ChaosCorrelation, HEATMAP_DAYS};
pub use streak::{
    badges, has_calibrated_compass, has_consistent_energy, streak, today_checkin, Badges,
};
pub use trial::{can_add_experiment, is_premium, trial_days_left};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;

    use crate::model::{ChaosLevel, DailyCheckin, Priority};

    pub fn checkin_with(date: NaiveDate, energy: [u8; 3], tarefas: u32) -> DailyCheckin {
        DailyCheckin {
            id: format!("c-{date}"),
            user_id: "u".into(),
            date,
            energia_fisica: energy[0],
            energia_mental: energy[1],
            energia_emocional: energy[2],
            nivel_caos: ChaosLevel::Medio,
            prioridades: Vec::new(),
            tarefas_completadas: tarefas,
            reflexao_noturna: None,
            energia_fisica_noturna: None,
            energia_mental_noturna: None,
            energia_emocional_noturna: None,
            evening_completed: None,
        }
    }

    /// Check-in with the same energy on all three axes.
    pub fn checkin_on(date: NaiveDate, level: u8) -> DailyCheckin {
        checkin_with(date, [level; 3], 0)
    }

    pub fn checkin_with_priorities(date: NaiveDate, items: &[(&str, bool)]) -> DailyCheckin {
        let mut c = checkin_on(date, 3);
        c.prioridades = items
            .iter()
            .enumerate()
            .map(|(i, (text, completed))| Priority {
                id: format!("{date}-{i}"),
                text: text.to_string(),
                completed: *completed,
                created_at: None,
            })
            .collect();
        c.tarefas_completadas = c.completed_count();
        c
    }
}
