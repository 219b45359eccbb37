use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "bussola", version, about = "Bússola do Caos CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dashboard: today's check-in, insight, badges and trial
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Morning and evening check-ins
    Checkin {
        #[command(subcommand)]
        action: commands::checkin::CheckinAction,
    },
    /// Priorities of a check-in
    Priority {
        #[command(subcommand)]
        action: commands::priority::PriorityAction,
    },
    /// Test, adjust, scale experiments
    Experiment {
        #[command(subcommand)]
        action: commands::experiment::ExperimentAction,
    },
    /// Evolution analytics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// User, subscription and trial
    User {
        #[command(subcommand)]
        action: commands::user::UserAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Page navigation
    Nav {
        #[command(subcommand)]
        action: commands::nav::NavAction,
    },
    /// First-run diagnosis
    Onboarding {
        #[command(subcommand)]
        action: commands::onboarding::OnboardingAction,
    },
    /// Delete all data and start over
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn init_tracing() {
    let level = bussola_core::Config::load_or_default().log.level;
    let filter = EnvFilter::try_from_env("BUSSOLA_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Status { json } => commands::status::run(json),
        Commands::Checkin { action } => commands::checkin::run(action),
        Commands::Priority { action } => commands::priority::run(action),
        Commands::Experiment { action } => commands::experiment::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::User { action } => commands::user::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Nav { action } => commands::nav::run(action),
        Commands::Onboarding { action } => commands::onboarding::run(action),
        Commands::Reset { yes } => commands::reset::run(yes),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
