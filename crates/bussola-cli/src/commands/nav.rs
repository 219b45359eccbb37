//! Navigation. The page is not persisted, so each invocation starts from the
//! page the stored state opens on.

use clap::Subcommand;

use bussola_core::Page;

use super::{open_store, CliResult};

#[derive(Subcommand)]
pub enum NavAction {
    /// Page the app opens on
    Current,
    /// Resolve a page name (unknown names open the dashboard)
    Go { page: String },
    /// List page names
    List,
}

pub fn run(action: NavAction) -> CliResult {
    match action {
        NavAction::Current => {
            let store = open_store()?;
            println!("{}", store.page());
        }
        NavAction::Go { page } => {
            let mut store = open_store()?;
            println!("{}", store.navigate(&page));
        }
        NavAction::List => {
            for page in Page::ALL {
                println!("{page}");
            }
        }
    }
    Ok(())
}
