//! Check-in commands.

use chrono::NaiveDate;
use clap::Subcommand;

use bussola_core::{ChaosLevel, EveningCheckin, MorningCheckin};

use super::{open_store, parse_energy, print_json, CliResult};

#[derive(Subcommand)]
pub enum CheckinAction {
    /// Morning check-in (creates or refreshes today's)
    Morning {
        /// Energy as "fisica,mental,emocional" or a single 1-5 value
        #[arg(long)]
        energy: String,
        /// Chaos level: baixo, medio or alto
        #[arg(long, default_value = "medio")]
        chaos: ChaosLevel,
        /// Priorities for the day (up to the configured maximum)
        #[arg(required = true)]
        priorities: Vec<String>,
    },
    /// Evening review of today's check-in
    Evening {
        /// Evening energy as "fisica,mental,emocional" or a single value
        #[arg(long)]
        energy: String,
        /// Free-text reflection
        #[arg(long, default_value = "")]
        reflection: String,
        /// Completed tasks; defaults to the completed priorities
        #[arg(long)]
        tasks: Option<u32>,
    },
    /// Show a check-in (today by default)
    Show {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List all check-ins, newest first
    List {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: CheckinAction) -> CliResult {
    let mut store = open_store()?;

    match action {
        CheckinAction::Morning {
            energy,
            chaos,
            priorities,
        } => {
            let input = MorningCheckin {
                energy: parse_energy(&energy)?,
                nivel_caos: chaos,
                priorities,
            };
            let outcome = store.submit_morning(&input)?;
            if outcome.created {
                println!("Check-in created: {}", outcome.checkin_id);
            } else {
                println!("Check-in updated: {}", outcome.checkin_id);
            }
        }
        CheckinAction::Evening {
            energy,
            reflection,
            tasks,
        } => {
            let input = EveningCheckin {
                energy: parse_energy(&energy)?,
                reflexao: reflection,
                tarefas_completadas: tasks,
            };
            store.submit_evening(&input)?;
            println!("Evening check-in saved");
        }
        CheckinAction::Show { date } => {
            let date = date.unwrap_or_else(|| store.today());
            let checkin = store
                .data()
                .checkin_on(date)
                .ok_or_else(|| format!("no check-in on {date}"))?;
            print_json(checkin)?;
        }
        CheckinAction::List { json } => {
            let mut checkins: Vec<_> = store.data().checkins.iter().collect();
            checkins.sort_by(|a, b| b.date.cmp(&a.date));
            if json {
                return print_json(&checkins);
            }
            for c in checkins {
                println!(
                    "{}  energy {:.1}  chaos {:<5}  tasks {}{}",
                    c.date,
                    c.morning_average(),
                    c.nivel_caos.label(),
                    c.tarefas_completadas,
                    if c.is_evening_completed() { "  (evening done)" } else { "" }
                );
            }
        }
    }
    Ok(())
}
