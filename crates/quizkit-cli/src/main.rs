//! quizkit CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizkit", version, about = "Quiz evaluation and retry engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a quiz interactively
    Run {
        /// Path to a .toml quiz file
        #[arg(long)]
        quiz: PathBuf,

        /// Maximum failed attempts before giving up
        #[arg(long, default_value = "5")]
        max_attempts: u32,

        /// Seed for retry sampling (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Present each question standalone instead of as a graded group
        #[arg(long)]
        per_question: bool,

        /// Write the session report JSON here when the sitting ends
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Validate quiz TOML files
    Validate {
        /// Path to a quiz file or directory
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Search a remote question bank
    Search {
        /// Keyword to search for
        query: String,

        /// Question bank base URL (defaults to the public FaceIT bank)
        #[arg(long)]
        base_url: Option<String>,

        /// Passing threshold stamped onto the fetched package
        #[arg(long, default_value = "1.0")]
        threshold: f64,

        /// Save the fetched package as JSON instead of listing it
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Create an example quiz to get started
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizkit=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            quiz,
            max_attempts,
            seed,
            per_question,
            report,
        } => commands::run::execute(quiz, max_attempts, seed, per_question, report),
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Search {
            query,
            base_url,
            threshold,
            output,
        } => commands::search::execute(query, base_url, threshold, output).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
