//! Weekly energy series, burnout detection and the daily insight.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::{ChaosLevel, DailyCheckin};

/// Days covered by the evolution chart and the burnout scan.
pub const WEEK_DAYS: i64 = 7;

/// Consecutive strict decreases that raise the burnout alert.
pub const BURNOUT_DECLINE_RUN: u32 = 2;

/// One day of the evolution chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayPoint {
    pub date: NaiveDate,
    /// Morning average rounded to one decimal, 0.0 when there is no check-in.
    pub energia: f64,
    pub tarefas: u32,
}

impl DayPoint {
    pub fn has_data(&self) -> bool {
        self.energia > 0.0
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// The last seven days ending at `today`, oldest first.
pub fn energy_series(checkins: &[DailyCheckin], today: NaiveDate) -> Vec<DayPoint> {
    (0..WEEK_DAYS)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let checkin = checkins.iter().find(|c| c.date == date);
            DayPoint {
                date,
                energia: checkin
                    .map(|c| round_one_decimal(c.morning_average()))
                    .unwrap_or(0.0),
                tarefas: checkin.map(|c| c.tarefas_completadas).unwrap_or(0),
            }
        })
        .collect()
}

/// True when energy has dropped on each of the last two recorded days of the week.
///
/// Days without a check-in are skipped rather than treated as a drop. The
/// decline run resets whenever a day is not strictly lower than the one
/// before it, so only the current trend matters.
pub fn burnout_alert(checkins: &[DailyCheckin], today: NaiveDate) -> bool {
    let valid: Vec<f64> = energy_series(checkins, today)
        .into_iter()
        .filter(DayPoint::has_data)
        .map(|p| p.energia)
        .collect();
    declining_run(&valid) >= BURNOUT_DECLINE_RUN
}

/// Length of the trailing run of strict decreases in `values`.
fn declining_run(values: &[f64]) -> u32 {
    let mut run = 0;
    for pair in values.windows(2) {
        if pair[1] < pair[0] {
            run += 1;
        } else {
            run = 0;
        }
    }
    run
}

/// Totals shown at the top of the evolution page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvolutionSummary {
    pub total_checkins: usize,
    pub total_tasks: u32,
    /// Mean of the recorded days of the last week.
    pub avg_energy: Option<f64>,
}

pub fn evolution_summary(checkins: &[DailyCheckin], today: NaiveDate) -> EvolutionSummary {
    let recorded: Vec<f64> = energy_series(checkins, today)
        .into_iter()
        .filter(DayPoint::has_data)
        .map(|p| p.energia)
        .collect();
    let avg_energy =
        (!recorded.is_empty()).then(|| recorded.iter().sum::<f64>() / recorded.len() as f64);
    EvolutionSummary {
        total_checkins: checkins.len(),
        total_tasks: checkins.iter().map(|c| c.tarefas_completadas).sum(),
        avg_energy,
    }
}

/// Energy band used by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyBand {
    Low,
    Stable,
    High,
}

impl EnergyBand {
    pub fn from_rounded_average(avg: u8) -> Self {
        match avg {
            0..=2 => EnergyBand::Low,
            3 => EnergyBand::Stable,
            _ => EnergyBand::High,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            EnergyBand::Low => "Energia Baixa",
            EnergyBand::Stable => "Energia Estável",
            EnergyBand::High => "Energia Alta",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyInsight {
    pub band: Option<EnergyBand>,
    pub title: String,
    pub message: String,
}

/// Advice for the day based on today's check-in.
pub fn daily_insight(checkin: Option<&DailyCheckin>) -> DailyInsight {
    let Some(checkin) = checkin else {
        return DailyInsight {
            band: None,
            title: "Insight do Dia".to_string(),
            message: "Faça seu check-in matinal para receber insights personalizados.".to_string(),
        };
    };

    let band = EnergyBand::from_rounded_average(checkin.rounded_morning_average());
    let high_chaos = checkin.nivel_caos == ChaosLevel::Alto;
    let message = match (high_chaos, band) {
        (true, EnergyBand::Low) => "Caos alto + energia baixa. Foque APENAS na #1. Proteja sua energia.",
        (true, _) => "Seu caos está alto hoje. Foque APENAS na #1. O resto é bônus.",
        (false, EnergyBand::High) => "Aproveite para atacar as tarefas mais desafiadoras.",
        (false, EnergyBand::Low) => "Faça o mínimo essencial e descanse. Amanhã é outro dia.",
        (false, EnergyBand::Stable) => "Mantenha o ritmo e não se sobrecarregue.",
    };

    DailyInsight {
        band: Some(band),
        title: band.title().to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{checkin_on, checkin_with};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn days_ago(n: i64) -> NaiveDate {
        today() - Duration::days(n)
    }

    #[test]
    fn series_covers_seven_days_oldest_first() {
        let checkins = vec![checkin_with(days_ago(0), [4, 3, 3], 2), checkin_on(days_ago(6), 2)];
        let series = energy_series(&checkins, today());
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].date, days_ago(6));
        assert_eq!(series[0].energia, 2.0);
        assert_eq!(series[3].energia, 0.0);
        assert_eq!(series[6].energia, 3.3);
        assert_eq!(series[6].tarefas, 2);
    }

    #[test]
    fn strictly_falling_energy_raises_alert() {
        let checkins = vec![
            checkin_on(days_ago(2), 4),
            checkin_on(days_ago(1), 3),
            checkin_on(days_ago(0), 2),
        ];
        assert!(burnout_alert(&checkins, today()));
    }

    #[test]
    fn recovery_clears_alert() {
        let checkins = vec![
            checkin_on(days_ago(2), 2),
            checkin_on(days_ago(1), 4),
            checkin_on(days_ago(0), 3),
        ];
        assert!(!burnout_alert(&checkins, today()));

        let rebound = vec![
            checkin_on(days_ago(3), 5),
            checkin_on(days_ago(2), 4),
            checkin_on(days_ago(1), 3),
            checkin_on(days_ago(0), 4),
        ];
        assert!(!burnout_alert(&rebound, today()));
    }

    #[test]
    fn missing_days_are_skipped_not_zero() {
        let checkins = vec![
            checkin_on(days_ago(6), 5),
            checkin_on(days_ago(3), 4),
            checkin_on(days_ago(0), 3),
        ];
        assert!(burnout_alert(&checkins, today()));
    }

    #[test]
    fn checkins_older_than_a_week_are_ignored() {
        let checkins = vec![
            checkin_on(days_ago(9), 5),
            checkin_on(days_ago(8), 4),
            checkin_on(days_ago(0), 3),
        ];
        assert!(!burnout_alert(&checkins, today()));
    }

    #[test]
    fn equal_days_break_the_decline() {
        assert_eq!(declining_run(&[4.0, 3.0, 3.0]), 0);
        assert_eq!(declining_run(&[4.0, 3.7, 3.3]), 2);
        assert_eq!(declining_run(&[]), 0);
    }

    #[test]
    fn summary_counts_all_checkins_but_averages_the_week() {
        let checkins = vec![
            checkin_with(days_ago(20), [1, 1, 1], 3),
            checkin_with(days_ago(1), [4, 4, 4], 1),
            checkin_with(days_ago(0), [2, 2, 2], 2),
        ];
        let s = evolution_summary(&checkins, today());
        assert_eq!(s.total_checkins, 3);
        assert_eq!(s.total_tasks, 6);
        assert_eq!(s.avg_energy, Some(3.0));
        assert_eq!(evolution_summary(&[], today()).avg_energy, None);
    }

    #[test]
    fn insight_prioritises_chaos() {
        let mut c = checkin_on(today(), 2);
        c.nivel_caos = ChaosLevel::Alto;
        let insight = daily_insight(Some(&c));
        assert_eq!(insight.band, Some(EnergyBand::Low));
        assert_eq!(insight.title, "Energia Baixa");
        assert!(insight.message.starts_with("Caos alto + energia baixa"));

        c.energia_fisica = 5;
        c.energia_mental = 5;
        c.energia_emocional = 5;
        let insight = daily_insight(Some(&c));
        assert_eq!(insight.title, "Energia Alta");
        assert!(insight.message.starts_with("Seu caos está alto"));
    }

    #[test]
    fn insight_without_checkin_prompts_for_one() {
        let insight = daily_insight(None);
        assert_eq!(insight.band, None);
        assert!(insight.message.contains("check-in matinal"));
    }
}
