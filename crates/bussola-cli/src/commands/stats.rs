//! Evolution analytics.

use clap::Subcommand;
use serde::Serialize;

use bussola_core::analytics::{self, impact::DEFAULT_TOP_N, DayPoint, EvolutionSummary};

use super::{open_store, print_json, CliResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Last seven days of energy and tasks, plus totals
    Evolution {
        #[arg(long)]
        json: bool,
    },
    /// 80/20 ranking of recurring priorities
    Impact {
        /// Number of groups to show
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,
        #[arg(long)]
        json: bool,
    },
    /// Tasks on chaotic days versus the rest
    Chaos {
        #[arg(long)]
        json: bool,
    },
    /// Completed tasks over the last 28 days
    Heatmap {
        #[arg(long)]
        json: bool,
    },
    /// Streak and badges
    Streak {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct Evolution {
    series: Vec<DayPoint>,
    summary: EvolutionSummary,
    burnout_alert: bool,
}

pub fn run(action: StatsAction) -> CliResult {
    let store = open_store()?;
    let checkins = &store.data().checkins;
    let today = store.today();

    match action {
        StatsAction::Evolution { json } => {
            let evolution = Evolution {
                series: analytics::energy_series(checkins, today),
                summary: analytics::evolution_summary(checkins, today),
                burnout_alert: analytics::burnout_alert(checkins, today),
            };
            if json {
                return print_json(&evolution);
            }
            for point in &evolution.series {
                if point.has_data() {
                    println!("{}  energy {:.1}  tasks {}", point.date, point.energia, point.tarefas);
                } else {
                    println!("{}  -", point.date);
                }
            }
            println!(
                "Check-ins: {}  Tasks done: {}  Avg energy: {}",
                evolution.summary.total_checkins,
                evolution.summary.total_tasks,
                evolution
                    .summary
                    .avg_energy
                    .map(|e| format!("{e:.1}"))
                    .unwrap_or_else(|| "-".to_string())
            );
            if evolution.burnout_alert {
                println!("Warning: energy fell on each of the last recorded days.");
            }
        }
        StatsAction::Impact { top, json } => {
            let ranked = analytics::top_impact(checkins, top);
            if json {
                return print_json(&ranked);
            }
            if ranked.is_empty() {
                println!("No priorities recorded yet.");
            }
            for (i, entry) in ranked.iter().enumerate() {
                println!(
                    "{}. {}  {}/{} done ({:.0}%)",
                    i + 1,
                    entry.text,
                    entry.completions,
                    entry.total,
                    entry.completion_rate() * 100.0
                );
            }
        }
        StatsAction::Chaos { json } => {
            let correlation = analytics::chaos_correlation(checkins);
            if json {
                return print_json(&correlation);
            }
            match correlation {
                Some(c) => println!(
                    "On high-chaos days you complete {}% fewer tasks ({:.1} vs {:.1}).",
                    c.drop_percent, c.high_chaos_mean, c.other_mean
                ),
                None => println!("Not enough data for a chaos correlation."),
            }
        }
        StatsAction::Heatmap { json } => {
            let heatmap = analytics::productivity_heatmap(checkins, today);
            if json {
                return print_json(&heatmap);
            }
            for week in heatmap.chunks(7) {
                let row: Vec<String> = week.iter().map(|n| n.to_string()).collect();
                println!("{}", row.join(" "));
            }
        }
        StatsAction::Streak { json } => {
            let badges = analytics::badges(checkins, today);
            if json {
                return print_json(&badges);
            }
            println!("Streak: {} day(s)", badges.streak);
            println!("Consistent energy: {}", badges.consistent_energy);
            println!("Calibrated compass: {}", badges.calibrated_compass);
        }
    }
    Ok(())
}
