mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "relay",
    about = "Roblox Studio assistant relay: turns chat into validated script actions",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .relay/)
    #[arg(long, global = true, env = "RELAY_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default .relay/config.yaml
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Start the HTTP relay
    Serve {
        /// Port to listen on (default: server.port from config)
        #[arg(long, env = "RELAY_PORT")]
        port: Option<u16>,
    },

    /// Generate one action without touching any session
    Generate {
        /// What to build
        prompt: String,
        /// JSON file describing the game structure
        #[arg(long)]
        context: Option<PathBuf>,
    },

    /// Show a session's chat transcript
    History {
        /// Session id
        session: String,
    },

    /// Show actions waiting for the Studio plugin
    Pending {
        /// Session id
        session: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init { force } => cmd::init::run(&root, force),
        Commands::Serve { port } => cmd::serve::run(&root, port),
        Commands::Generate { prompt, context } => {
            cmd::generate::run(&root, &prompt, context.as_deref())
        }
        Commands::History { session } => cmd::history::run(&root, &session, cli.json),
        Commands::Pending { session } => cmd::pending::run(&root, &session, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
