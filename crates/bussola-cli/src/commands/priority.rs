//! Priority commands. The check-in defaults to today's.

use clap::Subcommand;

use super::{open_store, resolve_checkin, CliResult};

#[derive(Subcommand)]
pub enum PriorityAction {
    /// Add a priority
    Add {
        text: String,
        /// Check-in ID (default: today's)
        #[arg(long)]
        checkin: Option<String>,
    },
    /// Toggle a priority done/undone
    Toggle {
        id: String,
        #[arg(long)]
        checkin: Option<String>,
    },
    /// Replace a priority's text
    Edit {
        id: String,
        text: String,
        #[arg(long)]
        checkin: Option<String>,
    },
    /// Remove a priority
    Remove {
        id: String,
        #[arg(long)]
        checkin: Option<String>,
    },
    /// Move a priority from one position to another (1-based)
    Move {
        from: usize,
        to: usize,
        #[arg(long)]
        checkin: Option<String>,
    },
}

fn zero_based(position: usize) -> Result<usize, Box<dyn std::error::Error>> {
    position
        .checked_sub(1)
        .ok_or_else(|| "positions start at 1".into())
}

pub fn run(action: PriorityAction) -> CliResult {
    let mut store = open_store()?;

    match action {
        PriorityAction::Add { text, checkin } => {
            let checkin = resolve_checkin(&store, checkin)?;
            let id = store.add_priority(&checkin, &text)?;
            println!("Priority added: {id}");
        }
        PriorityAction::Toggle { id, checkin } => {
            let checkin = resolve_checkin(&store, checkin)?;
            let completed = store.toggle_priority(&checkin, &id)?;
            println!("{}", if completed { "done" } else { "open" });
        }
        PriorityAction::Edit { id, text, checkin } => {
            let checkin = resolve_checkin(&store, checkin)?;
            store.edit_priority(&checkin, &id, &text)?;
            println!("ok");
        }
        PriorityAction::Remove { id, checkin } => {
            let checkin = resolve_checkin(&store, checkin)?;
            store.remove_priority(&checkin, &id)?;
            println!("Priority removed: {id}");
        }
        PriorityAction::Move { from, to, checkin } => {
            let checkin = resolve_checkin(&store, checkin)?;
            store.reorder_priorities(&checkin, zero_based(from)?, zero_based(to)?)?;
            println!("ok");
        }
    }
    Ok(())
}
