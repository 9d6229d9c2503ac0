//! Sage Control - ask the learning assistant from the terminal

use anyhow::Result;
use clap::{Parser, Subcommand};
use sage_common::{ModelId, SageError};
use sagectl::commands::{self, AskOptions};
use sagectl::errors::EXIT_GENERAL_ERROR;
use sagectl::output::display_error;
use tracing_subscriber::EnvFilter;

// Version is embedded at build time
const VERSION: &str = env!("SAGE_VERSION");

#[derive(Parser)]
#[command(name = "sagectl")]
#[command(about = "Sage - age-aware explanations from a local model", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a question
    Ask {
        /// The question or topic
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Learner age (3-80); defaults to the configured age
        #[arg(long, value_parser = clap::value_parser!(u8).range(3..=80))]
        age: Option<u8>,

        /// Model to use (gemma:2b or mistral)
        #[arg(long, value_parser = parse_model)]
        model: Option<ModelId>,

        /// Skip the "was this helpful?" question
        #[arg(long)]
        no_feedback: bool,
    },

    /// List selectable models
    Models,

    /// Check that Ollama is reachable
    Status,

    /// Show how to use Sage
    Guide,

    /// Show the effective configuration
    Config,
}

fn parse_model(s: &str) -> Result<ModelId, String> {
    s.parse().map_err(|e: SageError| e.to_string())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Ask {
            query,
            age,
            model,
            no_feedback,
        } => commands::ask(AskOptions {
            query: query.join(" "),
            age,
            model,
            no_feedback,
        }),
        Commands::Models => commands::models(),
        Commands::Status => commands::status(),
        Commands::Guide => commands::guide(),
        Commands::Config => commands::config(),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            display_error(&format!("{:#}", e));
            e.downcast_ref::<SageError>()
                .map(SageError::exit_code)
                .unwrap_or(EXIT_GENERAL_ERROR)
        }
    };
    std::process::exit(code);
}
