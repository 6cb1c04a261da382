use clap::{Parser, Subcommand};
use eyre::Result;
use problemlist::{Config, Session, session};
use std::io;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "problemlist")]
#[command(about = "ProblemList - keep a list of problems and search it as you type")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to a YAML config file (default: <config dir>/problemlist/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (default)
    Run,

    /// Read entries from stdin, one per line, and print those matching QUERY
    Filter {
        /// Search text; matching ignores case and repeated whitespace
        query: String,

        /// Print a JSON array instead of one entry per line
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = Config::resolve_path(cli.config.as_deref());
    let mut config = Config::load(cli.config.as_deref())?;
    if cli.no_color {
        config.color = false;
    }

    // Setup tracing on stderr so it never mixes with the rendered list
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match &config_path {
        Some(path) => debug!(path = ?path, "Loaded config file"),
        None => debug!("No config file found, using defaults"),
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let mut session = Session::new(config);
            session.run(stdin.lock(), &mut stdout)?;
        }
        Commands::Filter { query, json } => {
            session::run_filter(stdin.lock(), &query, json, &mut stdout)?;
        }
    }

    Ok(())
}
