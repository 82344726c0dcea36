//! DynPrompt CLI
//!
//! Command-line interface for managing the active prompt document

use clap::{Parser, Subcommand};

mod commands;

use commands::Context;

#[derive(Debug, Parser)]
#[command(name = "dynprompt")]
#[command(about = "DynPrompt - instruction-driven prompt management", long_about = None)]
struct Cli {
    /// SQLite database path (overrides DYNPROMPT_DB_PATH / dynprompt.toml)
    #[arg(long, global = true)]
    db: Option<std::path::PathBuf>,

    /// Prompt namespace (overrides DYNPROMPT_NAMESPACE / dynprompt.toml)
    #[arg(long, global = true)]
    namespace: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load a prompt from a file, URL or literal text
    Load(commands::load::LoadArgs),
    /// Print the active prompt
    Show,
    /// Apply a natural-language instruction to the active prompt
    Modify(commands::modify::ModifyArgs),
    /// Restore the active prompt from the backup
    Revert,
    /// Show line differences between backup and active prompt
    Diff,
    /// Show recent audit log entries
    History(commands::history::HistoryArgs),
    /// Remove both prompt slots and the audit log
    Clear,
    /// Show slot presence and sizes
    Metadata,
}

fn main() {
    let cli = Cli::parse();

    let result = Context::open(cli.db, cli.namespace).and_then(|ctx| match cli.command {
        Commands::Load(args) => commands::load::execute(&ctx, args),
        Commands::Show => commands::show::execute(&ctx),
        Commands::Modify(args) => commands::modify::execute(&ctx, args),
        Commands::Revert => commands::revert::execute(&ctx),
        Commands::Diff => commands::diff::execute(&ctx),
        Commands::History(args) => commands::history::execute(&ctx, args),
        Commands::Clear => commands::clear::execute(&ctx),
        Commands::Metadata => commands::metadata::execute(&ctx),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
