//! PhraseDB CLI
//!
//! Command-line tools for a local PhraseDB replica.
//!
//! # Commands
//!
//! - `learn` - Record a confirmed use of a phrase
//! - `suggest` - List ranked completions for a prefix
//! - `best` - Show the single best completion for a prefix
//! - `export` - Write a frequency-only backup snapshot
//! - `import` - Restore a backup snapshot as fresh local writes
//! - `inspect` - Show replica statistics
//! - `clear` - Wipe every record for the user
//!
//! The CLI operates on the local replica only; the sync transport stays a
//! library seam, so writes made here are queued as dirty records for
//! whatever deployment eventually drains them.

mod commands;

use clap::{Parser, Subcommand};
use phrasedb_store::FileStore;
use phrasedb_sync_engine::{OfflineTransport, Session};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// PhraseDB command-line replica tools.
#[derive(Parser)]
#[command(name = "phrasedb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the replica document
    #[arg(global = true, short, long)]
    store: Option<PathBuf>,

    /// User id owning the records
    #[arg(global = true, short, long)]
    user: Option<String>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a confirmed use of a phrase
    Learn {
        /// The phrase that was used
        phrase: String,
    },

    /// List ranked completions for a prefix
    Suggest {
        /// The typed prefix
        prefix: String,

        /// Maximum number of completions to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show the single best completion for a prefix
    Best {
        /// The typed prefix
        prefix: String,
    },

    /// Write a frequency-only backup snapshot
    Export {
        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Restore a backup snapshot as fresh local writes
    Import {
        /// Snapshot file to read
        file: PathBuf,
    },

    /// Show replica statistics
    Inspect,

    /// Wipe every record for the user
    Clear,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Commands::Version = cli.command {
        println!("PhraseDB CLI v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let store_path = cli.store.ok_or("replica path required (--store)")?;
    let user_id = cli.user.ok_or("user id required (--user)")?;

    let store = Arc::new(FileStore::open(&store_path)?);
    let session = Session::new(&user_id, store, Arc::new(OfflineTransport))?;
    // Build the index from whatever the replica holds; with no remote
    // authority configured a warm round degrades to offline mode, which is
    // exactly what local tooling wants.
    let report = session.initialize()?;
    tracing::debug!(
        replica = %store_path.display(),
        user = %session.user_id(),
        mode = ?report.mode,
        "session ready"
    );

    match cli.command {
        Commands::Learn { phrase } => commands::learn::run(&session, &phrase)?,
        Commands::Suggest { prefix, limit } => commands::suggest::run(&session, &prefix, limit),
        Commands::Best { prefix } => commands::suggest::run_best(&session, &prefix),
        Commands::Export { pretty, out } => commands::backup::export(&session, pretty, out)?,
        Commands::Import { file } => commands::backup::import(&session, &file)?,
        Commands::Inspect => commands::inspect::run(&session)?,
        Commands::Clear => {
            session.wipe()?;
            println!("Cleared all records for user '{}'", session.user_id());
        }
        Commands::Version => unreachable!("handled above"),
    }

    Ok(())
}
