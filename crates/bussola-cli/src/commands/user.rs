//! User and subscription commands.

use clap::Subcommand;
use serde::Serialize;

use bussola_core::model::{trial_end, MAX_TRIAL_DAYS};
use bussola_core::{Subscription, User, UserPatch};

use super::{open_store, print_json, CliResult};

#[derive(Subcommand)]
pub enum UserAction {
    /// Show the user and plan
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Dev tooling: set the subscription (free or premium)
    Subscription { plan: Subscription },
    /// Dev tooling: end the trial this many days from now (0 ends it)
    Trial { days: i64 },
}

#[derive(Serialize)]
struct UserView<'a> {
    #[serde(flatten)]
    user: &'a User,
    premium: bool,
    trial_days_left: i64,
}

pub fn run(action: UserAction) -> CliResult {
    let mut store = open_store()?;

    match action {
        UserAction::Show { json } => {
            let view = UserView {
                user: &store.data().user,
                premium: store.is_premium(),
                trial_days_left: store.trial_days_left(),
            };
            if json {
                return print_json(&view);
            }
            println!("User: {}", view.user.id);
            println!("Since: {}", view.user.created_at.format("%Y-%m-%d"));
            println!("Onboarding done: {}", view.user.onboarding_completed);
            println!("Subscription: {}", view.user.subscription);
            println!("Trial days left: {}", view.trial_days_left);
        }
        UserAction::Subscription { plan } => {
            store.update_user(&UserPatch {
                subscription: Some(plan),
                ..Default::default()
            });
            println!("Subscription: {plan}");
        }
        UserAction::Trial { days } => {
            if !(-MAX_TRIAL_DAYS..=MAX_TRIAL_DAYS).contains(&days) {
                return Err(format!("trial days must be within ±{MAX_TRIAL_DAYS}").into());
            }
            let ends = trial_end(store.now(), days).ok_or("trial end is out of range")?;
            store.update_user(&UserPatch {
                trial_ends_at: Some(ends),
                ..Default::default()
            });
            println!("Trial days left: {}", store.trial_days_left());
        }
    }
    Ok(())
}
