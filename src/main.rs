//! Binary entry point for prescreen.
//!
//! This binary provides the CLI interface for AI-assisted permit
//! application pre-screening.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{CommandFactory, Parser, Subcommand};
use prescreen::cli::build_stack_client;
use prescreen::config::PrescreenConfig;
use prescreen::{
    ApplicationSubmission, Error, ProvisionService, ReviewService, observability, stack::AgentStack,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Prescreen - AI-assisted compliance pre-screening for permit applications.
#[derive(Parser)]
#[command(name = "prescreen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Review a permit application and generate a compliance scorecard.
    Review {
        /// Official name of the food truck business.
        #[arg(long)]
        business_name: String,

        /// Name and address of the commissary kitchen.
        #[arg(long)]
        commissary: String,

        /// Menu items, comma-separated.
        #[arg(long)]
        menu: String,

        /// Additional licenses, certifications, or special requirements.
        #[arg(long)]
        additional_info: Option<String>,

        /// Write the scorecard to a file as well as stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show stack connectivity and available models.
    Status,

    /// List the configured regulatory document sources.
    Corpus,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        shell: clap_complete::Shell,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init(cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(cli: Cli, config: PrescreenConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Review {
            business_name,
            commissary,
            menu,
            additional_info,
            output,
        } => cmd_review(
            &config,
            ApplicationSubmission {
                business_name,
                commissary,
                menu,
                additional_info,
            },
            output,
        ),

        Commands::Status => cmd_status(&config),

        Commands::Corpus => cmd_corpus(&config),

        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "prescreen",
                &mut std::io::stdout(),
            );
            Ok(())
        },
    }
}

/// Loads configuration.
fn load_config(path: Option<&str>) -> Result<PrescreenConfig, Box<dyn std::error::Error>> {
    // If a path is provided, load from that file
    if let Some(config_path) = path {
        return PrescreenConfig::load_from_file(std::path::Path::new(config_path))
            .map(PrescreenConfig::with_env_overrides)
            .map_err(std::convert::Into::into);
    }

    // Environment override for config path
    if let Ok(config_path) = std::env::var("PRESCREEN_CONFIG_PATH") {
        if !config_path.trim().is_empty() {
            return PrescreenConfig::load_from_file(std::path::Path::new(&config_path))
                .map(PrescreenConfig::with_env_overrides)
                .map_err(std::convert::Into::into);
        }
    }

    // Otherwise, load from default location
    Ok(PrescreenConfig::load_default())
}

/// Reviews one application: provision once, submit one turn, print the
/// scorecard.
fn cmd_review(
    config: &PrescreenConfig,
    submission: ApplicationSubmission,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    submission.validate()?;

    let stack = Arc::new(build_stack_client(config));
    let mut provisioner = ProvisionService::new(Arc::clone(&stack), config.clone());

    eprintln!("Provisioning permitting agent (ingesting regulatory corpus)...");
    let session = match provisioner.provision() {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Make sure a Llama Stack server is running on {}", config.endpoint);
            return Err(e.into());
        },
    };

    eprintln!("Reviewing application for '{}'...", submission.business_name);
    let reviewer = ReviewService::new(stack);
    let scorecard = reviewer.review(&session, &submission)?;

    println!("{}", scorecard.as_markdown());
    eprintln!();
    eprintln!(
        "Note: this is an AI-generated preliminary review. All applications \
         require final review and approval by a human permitting officer."
    );

    if let Some(path) = output {
        scorecard.write_to(&path)?;
        eprintln!("Scorecard saved to {}", path.display());
    }

    Ok(())
}

/// Reports stack reachability and the model catalog.
fn cmd_status(config: &PrescreenConfig) -> Result<(), Box<dyn std::error::Error>> {
    let stack = build_stack_client(config);

    println!("Endpoint: {}", config.endpoint);
    println!("Model:    {}", config.model);

    if !stack.is_available() {
        return Err(Box::new(Error::OperationFailed {
            operation: "status".to_string(),
            cause: format!("stack is not reachable at {}", config.endpoint),
        }));
    }
    println!("Stack:    connected");

    let models = stack.list_models()?;
    let embedding_count = models.iter().filter(|m| m.is_embedding()).count();
    println!(
        "Models:   {} total, {} embedding",
        models.len(),
        embedding_count
    );

    if embedding_count == 0 {
        eprintln!("Warning: no embedding model registered; provisioning will fail");
    }
    if !models.iter().any(|m| m.identifier == config.model) {
        eprintln!(
            "Warning: configured model '{}' is not in the stack catalog",
            config.model
        );
    }

    Ok(())
}

/// Lists the configured regulatory corpus.
fn cmd_corpus(config: &PrescreenConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "Regulatory corpus ({} documents, {} token chunks):",
        config.corpus.len(),
        config.chunk_size_in_tokens
    );
    for (i, source) in config.corpus.iter().enumerate() {
        println!("  permit-doc-{i} [{}] {}", source.source, source.url);
    }
    Ok(())
}
