//! Load a fixture file into the Postgres document table

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use courserev_core::Fixture;
use courserev_server::PgDocumentStore;

use super::source::connect;
use crate::config::CourserevConfig;

#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// YAML/JSON fixture to load
    #[arg(value_name = "FILE")]
    pub fixture: PathBuf,

    /// Database URL (overrides config)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

pub async fn run_seed(args: SeedArgs, config: &CourserevConfig) -> Result<()> {
    // Parse everything before touching the database
    let documents = Fixture::from_path(&args.fixture)
        .and_then(Fixture::into_documents)
        .with_context(|| format!("Failed to load fixture {}", args.fixture.display()))?;

    let pool = connect(args.database_url.as_deref(), config, true).await?;
    let written = PgDocumentStore::new(pool)
        .seed(&documents)
        .await
        .context("Failed to write documents")?;

    println!("Seeded {written} documents from {}", args.fixture.display());
    Ok(())
}
