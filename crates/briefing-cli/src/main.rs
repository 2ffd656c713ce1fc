mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "briefing",
    about = "Video briefing wizard: fill an 8-step briefing, keep it on disk, share it as text",
    version,
    propagate_version = true
)]
struct Cli {
    /// Data directory (default: ~/.briefing)
    #[arg(long, global = true, env = "BRIEFING_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List saved projects, newest first
    List,

    /// Print one project as its share text
    Show { id: String },

    /// Start the wizard on a fresh briefing
    New {
        /// Open the share link with the system handler on finish
        #[arg(long)]
        open: bool,
    },

    /// Resume the wizard on a saved project
    Edit {
        id: String,

        /// Open the share link with the system handler on finish
        #[arg(long)]
        open: bool,
    },

    /// Delete a project (no-op for unknown ids)
    Delete { id: String },

    /// Build the share link for a saved project
    Share {
        id: String,

        /// Open the link with the system handler
        #[arg(long)]
        open: bool,
    },

    /// Show or validate the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so `--json` output stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::List => cmd::project::list(&root, cli.json),
        Commands::Show { id } => cmd::project::show(&root, &id, cli.json),
        Commands::New { open } => cmd::wizard::new(&root, open),
        Commands::Edit { id, open } => cmd::wizard::edit(&root, &id, open),
        Commands::Delete { id } => cmd::project::delete(&root, &id, cli.json),
        Commands::Share { id, open } => cmd::project::share(&root, &id, open, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
