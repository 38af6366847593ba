//! Draftly CLI
//!
//! Command-line interface for Draftly - secret-link sharing for draft
//! documents.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use draftly_core::Store;

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "draftly")]
#[command(about = "Draftly - secret-link sharing for draft documents")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage documents
    Doc {
        #[command(subcommand)]
        command: DocCommands,
    },
    /// Toggle and inspect public sharing
    Share {
        #[command(subcommand)]
        command: ShareCommands,
    },
    /// Read a document the way an unauthenticated visitor would
    Fetch {
        /// Document ID (full UUID or prefix)
        id: String,
        /// Share secret presented with the request
        #[arg(long)]
        secret: Option<String>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum DocCommands {
    /// Create a new document
    #[command(alias = "add")]
    Create {
        /// Document title
        title: String,
        /// Document body
        #[arg(short, long)]
        body: Option<String>,
        /// Publication status (draft, pending, scheduled, published)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// List all documents
    #[command(alias = "ls")]
    List,
    /// Show document details
    Show {
        /// Document ID (full UUID or prefix)
        id: String,
    },
    /// Delete a document
    #[command(alias = "rm")]
    Delete {
        /// Document ID (full UUID or prefix)
        id: String,
    },
}

#[derive(Subcommand)]
enum ShareCommands {
    /// Make a document publicly reachable via a secret link
    Public {
        /// Document ID (full UUID or prefix)
        id: String,
    },
    /// Revoke a document's secret link
    Private {
        /// Document ID (full UUID or prefix)
        id: String,
    },
    /// Show current sharing state
    Status {
        /// Document ID (full UUID or prefix)
        id: String,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, base_url, secret_length)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the store
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), &output);
    }

    let mut store = Store::open()?;

    match cli.command {
        Commands::Doc { command } => handle_doc_command(command, &mut store, &output),
        Commands::Share { command } => handle_share_command(command, &mut store, &output),
        Commands::Fetch { id, secret } => commands::fetch::fetch(&store, id, secret, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_doc_command(command: DocCommands, store: &mut Store, output: &Output) -> Result<()> {
    match command {
        DocCommands::Create {
            title,
            body,
            status,
        } => commands::doc::create(store, title, body, status, output),
        DocCommands::List => commands::doc::list(store, output),
        DocCommands::Show { id } => commands::doc::show(store, id, output),
        DocCommands::Delete { id } => commands::doc::delete(store, id, output),
    }
}

fn handle_share_command(command: ShareCommands, store: &mut Store, output: &Output) -> Result<()> {
    match command {
        ShareCommands::Public { id } => commands::share::public(store, id, output),
        ShareCommands::Private { id } => commands::share::private(store, id, output),
        ShareCommands::Status { id } => commands::share::status(store, id, output),
    }
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}

/// Initialize stderr logging, filtered by RUST_LOG
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
