//! Dashboard summary.

use bussola_core::analytics::{self, Badges, DailyInsight};
use bussola_core::{DailyCheckin, Page};
use serde::Serialize;

use super::{open_store, print_json, CliResult};

#[derive(Serialize)]
struct Dashboard<'a> {
    page: Page,
    today: chrono::NaiveDate,
    checkin: Option<&'a DailyCheckin>,
    insight: DailyInsight,
    badges: Badges,
    burnout_alert: bool,
    premium: bool,
    trial_days_left: i64,
    active_experiments: usize,
}

pub fn run(json: bool) -> CliResult {
    let store = open_store()?;
    let data = store.data();
    let today = store.today();
    let checkin = store.today_checkin();

    let dashboard = Dashboard {
        page: store.page(),
        today,
        checkin,
        insight: analytics::daily_insight(checkin),
        badges: analytics::badges(&data.checkins, today),
        burnout_alert: analytics::burnout_alert(&data.checkins, today),
        premium: store.is_premium(),
        trial_days_left: store.trial_days_left(),
        active_experiments: data.active_experiments().count(),
    };

    if json {
        return print_json(&dashboard);
    }

    if dashboard.page == Page::Onboarding {
        println!("Welcome! Run `bussola onboarding finish` to set up your first day.");
    }
    println!("{} ({})", dashboard.insight.title, today);
    println!("  {}", dashboard.insight.message);

    match checkin {
        Some(c) => {
            println!(
                "Energy: {:.1}  Chaos: {}  Done: {}/{}",
                c.morning_average(),
                c.nivel_caos.label(),
                c.completed_count(),
                c.prioridades.len()
            );
            for (i, p) in c.prioridades.iter().enumerate() {
                let mark = if p.completed { "x" } else { " " };
                println!("  {}. [{mark}] {}  ({})", i + 1, p.text, p.id);
            }
            if !c.is_evening_completed() {
                println!("Evening check-in pending.");
            }
        }
        None => println!("No check-in yet today."),
    }

    println!("Streak: {} day(s)", dashboard.badges.streak);
    if dashboard.badges.consistent_energy {
        println!("Badge: consistent energy");
    }
    if dashboard.badges.calibrated_compass {
        println!("Badge: calibrated compass");
    }
    if dashboard.burnout_alert {
        println!("Warning: energy has been falling for several days.");
    }
    if store.data().user.is_premium_subscriber() {
        println!("Plan: premium");
    } else if dashboard.premium {
        println!("Plan: trial ({} day(s) left)", dashboard.trial_days_left);
    } else {
        println!("Plan: free");
    }
    Ok(())
}
