use clap::{Parser, Subcommand};
use studyboard_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "studyboard", version, about = "Study, grades and chores dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate every tracked metric against its thresholds
    Status {
        /// Evaluate as of this date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<chrono::NaiveDate>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Study session tracking
    Study {
        #[command(subcommand)]
        action: commands::study::StudyAction,
    },
    /// Grade tracking
    Grade {
        #[command(subcommand)]
        action: commands::grade::GradeAction,
    },
    /// Chore tracking
    Chore {
        #[command(subcommand)]
        action: commands::chore::ChoreAction,
    },
    /// Goals and notification thresholds stored with the dashboard
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Application configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = commands::open_dashboard(config)?;
    match command {
        Commands::Status { date, json } => commands::status::run(&dashboard, date, json),
        Commands::Study { action } => commands::study::run(&dashboard, action),
        Commands::Grade { action } => commands::grade::run(&dashboard, action),
        Commands::Chore { action } => commands::chore::run(&dashboard, action),
        Commands::Settings { action } => commands::settings::run(&dashboard, action),
        Commands::Config { action } => commands::config::run(action),
    }
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load();
    init_logging(
        config
            .as_ref()
            .map(|c| c.logging.filter.as_str())
            .unwrap_or("warn"),
    );

    let result = match (cli.command, config) {
        // Config commands must work even when the config file is broken.
        (Commands::Config { action }, _) => commands::config::run(action),
        (command, Ok(config)) => run(command, &config),
        (_, Err(e)) => Err(e.into()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
