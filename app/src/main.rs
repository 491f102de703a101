#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use clap::{Parser, Subcommand};
use command::{
    BatchInput, BatchStrategy, CommandStrategy, InfoStrategy, InitStrategy, KeytermsInput,
    KeytermsStrategy, ScanInput, ScanStrategy, VersionStrategy,
};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "orderscribe")]
#[command(about = "Turn spoken-order transcripts into order lines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match one transcript against a menu
    Scan {
        /// Menu JSON file (array of items)
        #[arg(short, long)]
        menu: PathBuf,

        /// Transcript text
        #[arg(short, long, conflicts_with = "response", required_unless_present = "response")]
        transcript: Option<String>,

        /// Transcription service response body (JSON)
        #[arg(short, long)]
        response: Option<PathBuf>,

        /// Print the draft order instead of the raw matches
        #[arg(short, long)]
        draft: bool,
    },
    /// Match every service payload in a JSONL file
    Batch {
        /// Menu JSON file (array of items)
        #[arg(short, long)]
        menu: PathBuf,

        /// One service response body per line
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Print the keyterms sent to the transcription service
    Keyterms {
        /// Menu JSON file (array of items)
        #[arg(short, long)]
        menu: PathBuf,
    },
    /// Initialize configuration
    Init,
    /// Show configuration
    Info,
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            menu,
            transcript,
            response,
            draft,
        } => ScanStrategy.execute(ScanInput {
            menu,
            transcript,
            response,
            draft,
        }),
        Commands::Batch { menu, input } => BatchStrategy.execute(BatchInput { menu, input }),
        Commands::Keyterms { menu } => KeytermsStrategy.execute(KeytermsInput { menu }),
        Commands::Init => InitStrategy.execute(()),
        Commands::Info => InfoStrategy.execute(()),
        Commands::Version => VersionStrategy.execute(()),
    }
}
