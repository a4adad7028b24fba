use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use zeroscreen_core::Config;

mod commands;

#[derive(Parser)]
#[command(name = "zeroscreen", version, about = "ZeroScreen CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show points, level and goal
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Daily goal management
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Log today's screen time and score it
    Log(commands::log::LogArgs),
    /// First-run onboarding
    Onboarding {
        #[command(subcommand)]
        action: commands::onboarding::OnboardingAction,
    },
    /// Erase goal, points and onboarding state
    Erase {
        /// Confirm erasing all data
        #[arg(long)]
        yes: bool,
    },
    /// Show the shareable score card
    Share {
        /// Also write the card as SVG to this path
        #[arg(long)]
        svg: Option<std::path::PathBuf>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// `ZEROSCREEN_LOG` wins over the configured level.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_env("ZEROSCREEN_LOG")
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_logging(&config);

    if config.debug.print_state {
        match commands::open_state() {
            Ok(state) => state.log_state(),
            Err(e) => tracing::warn!(error = %e, "cannot open state for debug dump"),
        }
    }

    let result = match cli.command {
        Commands::Status { json } => commands::status::run(json),
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Log(args) => commands::log::run(args),
        Commands::Onboarding { action } => commands::onboarding::run(action),
        Commands::Erase { yes } => commands::erase::run(yes),
        Commands::Share { svg } => commands::share::run(&config, svg.as_deref()),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
