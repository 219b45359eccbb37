//! Experiment commands.

use clap::Subcommand;

use bussola_core::{Experiment, ExperimentDraft};

use super::{open_store, print_json, CliResult};

#[derive(Subcommand)]
pub enum ExperimentAction {
    /// Start a new experiment
    Create {
        /// Name
        nome: String,
        /// Hypothesis being tested
        #[arg(long)]
        hipotese: String,
        /// Duration in days
        #[arg(long, default_value = "7")]
        dias: u32,
    },
    /// List experiments
    List {
        /// Include finished experiments
        #[arg(long)]
        all: bool,
        #[arg(long)]
        json: bool,
    },
    /// Show one experiment with its notes
    Show { id: String },
    /// Move to the next phase (teste, ajuste, escala)
    Advance { id: String },
    /// Append a note
    Note { id: String, texto: String },
    /// Change name, hypothesis or duration
    Edit {
        id: String,
        #[arg(long)]
        nome: Option<String>,
        #[arg(long)]
        hipotese: Option<String>,
        #[arg(long)]
        dias: Option<u32>,
    },
    /// Finish an experiment
    Finish {
        id: String,
        /// What happened
        #[arg(long, default_value = "")]
        resultado: String,
        /// What comes next
        #[arg(long, default_value = "")]
        proximos: String,
    },
    /// Delete an experiment and its notes
    Delete { id: String },
}

pub fn run(action: ExperimentAction) -> CliResult {
    let mut store = open_store()?;

    match action {
        ExperimentAction::Create {
            nome,
            hipotese,
            dias,
        } => {
            let id = store.add_experiment(ExperimentDraft::new(nome, hipotese, dias))?;
            println!("Experiment created: {id}");
        }
        ExperimentAction::List { all, json } => {
            let now = store.now();
            let data = store.data();
            let mut experiments: Vec<&Experiment> = data.active_experiments().collect();
            if all {
                experiments.extend(data.completed_experiments());
            }
            if json {
                return print_json(&experiments);
            }
            for e in experiments {
                let state = if e.is_completed() {
                    "finished".to_string()
                } else {
                    format!("day {}/{}", e.days_running(now), e.duracao)
                };
                println!("{}  [{}] {}  ({state})", e.id, e.fase.label(), e.nome);
            }
        }
        ExperimentAction::Show { id } => {
            let experiment = store
                .data()
                .experiment(&id)
                .ok_or_else(|| format!("experiment not found: {id}"))?;
            print_json(experiment)?;
        }
        ExperimentAction::Advance { id } => {
            if store.advance_phase(&id)? {
                let fase = store.data().experiment(&id).map(|e| e.fase.label());
                println!("Phase: {}", fase.unwrap_or_default());
            } else {
                println!("Already in the last phase");
            }
        }
        ExperimentAction::Note { id, texto } => {
            let note_id = store.add_note(&id, &texto)?;
            println!("Note added: {note_id}");
        }
        ExperimentAction::Edit {
            id,
            nome,
            hipotese,
            dias,
        } => {
            let current = store
                .data()
                .experiment(&id)
                .cloned()
                .ok_or_else(|| format!("experiment not found: {id}"))?;
            store.edit_experiment(
                &id,
                nome.as_deref().unwrap_or(&current.nome),
                hipotese.as_deref().unwrap_or(&current.hipotese),
                dias.unwrap_or(current.duracao),
            )?;
            println!("ok");
        }
        ExperimentAction::Finish {
            id,
            resultado,
            proximos,
        } => {
            if store.finalize_experiment(&id, &resultado, &proximos)? {
                println!("Experiment finished: {id}");
            } else {
                println!("Experiment was already finished");
            }
        }
        ExperimentAction::Delete { id } => {
            store.remove_experiment(&id)?;
            println!("Experiment deleted: {id}");
        }
    }
    Ok(())
}
