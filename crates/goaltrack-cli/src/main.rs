use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use goaltrack_core::OracleProvider;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod context;

use context::Context;

#[derive(Parser)]
#[command(name = "goaltrack", version, about = "Energy-aware daily planner")]
struct Cli {
    /// Use a local JSON task file instead of the configured task store
    #[arg(long, global = true, value_name = "PATH")]
    tasks_file: Option<PathBuf>,

    /// Override the configured ranking oracle
    #[arg(long, global = true, value_enum)]
    oracle: Option<OracleArg>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OracleArg {
    Cohere,
    Heuristic,
    None,
}

impl From<OracleArg> for OracleProvider {
    fn from(arg: OracleArg) -> Self {
        match arg {
            OracleArg::Cohere => OracleProvider::Cohere,
            OracleArg::Heuristic => OracleProvider::Heuristic,
            OracleArg::None => OracleProvider::None,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest the best free slot for an activity
    Suggest(commands::suggest::SuggestArgs),
    /// Show a day's tasks and free slots
    Schedule(commands::schedule::ScheduleArgs),
    /// List tasks from the task store
    Tasks(commands::tasks::TasksArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Credential management for the task store and ranking oracle
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("GOALTRACK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // stdout carries command output only.
    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = Context {
        tasks_file: cli.tasks_file,
        oracle: cli.oracle.map(OracleProvider::from),
    };

    let result = match cli.command {
        Commands::Suggest(args) => commands::suggest::run(args, &ctx),
        Commands::Schedule(args) => commands::schedule::run(args, &ctx),
        Commands::Tasks(args) => commands::tasks::run(args, &ctx),
        Commands::Config { action } => commands::config::run(action),
        Commands::Auth { action } => commands::auth::run(action, &ctx),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
