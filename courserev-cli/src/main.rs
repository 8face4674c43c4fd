//! courserev CLI - course review reports
//!
//! Entry point for the `courserev` binary:
//! - `serve` runs the HTTP API over Postgres or a fixture file
//! - `report` prints a single course report as JSON
//! - `seed` loads a fixture into Postgres
//! - `config` inspects the resolved configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use commands::report::ReportArgs;
use commands::seed::SeedArgs;
use commands::serve::ServeArgs;
use config::{ConfigArgs, CourserevConfig};
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "courserev",
    author,
    version,
    about = "Course review reports: sections, lecturers and rating rollups per course"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: $COURSEREV_CONFIG, else ~/.courserev/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),
    /// Print the review report for one course as JSON
    Report(ReportArgs),
    /// Load a YAML/JSON fixture into the Postgres document table
    Seed(SeedArgs),
    /// Inspect courserev configuration
    Config(ConfigArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: clap_complete::Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    let config_path = CourserevConfig::resolve_path(cli.config.as_deref());
    let config = CourserevConfig::load(&config_path)?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, &config).await?,
        Commands::Report(args) => commands::run_report(args, &config).await?,
        Commands::Seed(args) => commands::run_seed(args, &config).await?,
        Commands::Config(args) => config::run_config(args, &config_path, &config)?,
        Commands::Completions(args) => run_completions(args),
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(args.shell, &mut cmd, bin_name, &mut std::io::stdout());
}
