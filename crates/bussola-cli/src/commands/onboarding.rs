//! First-run diagnosis.

use clap::{Args, Subcommand};

use bussola_core::onboarding::PROBLEM_OPTIONS;
use bussola_core::{DayType, Diagnosis, EnergyLevel};

use super::{open_store, print_json, CliResult};

#[derive(Args)]
pub struct DiagnosisArgs {
    /// Energy right now: esgotado, ok or cheio
    #[arg(long, default_value = "ok")]
    energia: EnergyLevel,
    /// How the day looks: caotico, meio_termo or tranquilo
    #[arg(long, default_value = "meio_termo")]
    dia: DayType,
    /// Main problem
    #[arg(long, default_value = "")]
    problema: String,
}

impl DiagnosisArgs {
    fn diagnosis(self) -> Diagnosis {
        Diagnosis::new(self.energia, self.dia, self.problema)
    }
}

#[derive(Subcommand)]
pub enum OnboardingAction {
    /// Show the recommendation for a diagnosis
    Diagnose {
        #[command(flatten)]
        args: DiagnosisArgs,
        #[arg(long)]
        json: bool,
    },
    /// Record the first check-in and finish onboarding
    Finish {
        #[command(flatten)]
        args: DiagnosisArgs,
        /// Priorities for today
        #[arg(required = true)]
        priorities: Vec<String>,
    },
    /// List the suggested main problems
    Problems,
}

pub fn run(action: OnboardingAction) -> CliResult {
    match action {
        OnboardingAction::Diagnose { args, json } => {
            let recommendation = args.diagnosis().recommendation();
            if json {
                return print_json(&recommendation);
            }
            println!(
                "Energia {} / dia {}: {}",
                recommendation.energia, recommendation.dia, recommendation.message
            );
        }
        OnboardingAction::Finish { args, priorities } => {
            let mut store = open_store()?;
            let diagnosis = args.diagnosis();
            let outcome = store.finish_onboarding(&diagnosis, &priorities)?;
            if outcome.created {
                println!("Onboarding complete. Check-in created: {}", outcome.checkin_id);
            } else {
                println!(
                    "Onboarding complete. Kept today's check-in: {}",
                    outcome.checkin_id
                );
            }
            println!("{}", diagnosis.recommendation().message);
        }
        OnboardingAction::Problems => {
            for problem in PROBLEM_OPTIONS {
                println!("{problem}");
            }
        }
    }
    Ok(())
}
