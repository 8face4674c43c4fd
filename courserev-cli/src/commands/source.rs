//! Data source selection shared by `serve` and `report`

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use sqlx::PgPool;

use courserev_core::{load_store, DocumentStore};
use courserev_server::db::{create_pool_with_options, migrations};
use courserev_server::PgDocumentStore;

use crate::config::CourserevConfig;

/// Where course data comes from
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Database URL (overrides config)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Read course data from a YAML/JSON fixture instead of Postgres
    #[arg(long, value_name = "FILE")]
    pub fixture: Option<PathBuf>,
}

/// An opened data source
pub struct Source {
    pub store: Arc<dyn DocumentStore>,
    /// Reported by `/health`
    pub backend: &'static str,
}

impl SourceArgs {
    /// Open the fixture if one was given, otherwise connect to Postgres.
    pub async fn open(&self, config: &CourserevConfig, migrate: bool) -> Result<Source> {
        if let Some(path) = &self.fixture {
            let store = load_store(path)
                .with_context(|| format!("Failed to load fixture {}", path.display()))?;
            tracing::info!(fixture = %path.display(), "Using fixture store");
            return Ok(Source {
                store: Arc::new(store),
                backend: "fixture",
            });
        }

        let pool = connect(self.database_url.as_deref(), config, migrate).await?;
        Ok(Source {
            store: Arc::new(PgDocumentStore::new(pool)),
            backend: "postgres",
        })
    }
}

/// Connect using the flag/env URL or the config file's `[database]` section.
pub async fn connect(
    database_url: Option<&str>,
    config: &CourserevConfig,
    migrate: bool,
) -> Result<PgPool> {
    let url = database_url
        .map(str::to_owned)
        .or_else(|| config.database.url.clone())
        .context(
            "No data source. Pass --fixture FILE or --database-url URL, \
             set DATABASE_URL, or set [database] url in the config file",
        )?;

    let pool = create_pool_with_options(&url, config.database.max_connections)
        .await
        .context("Failed to create database pool")?;

    if migrate {
        migrations::run(&pool)
            .await
            .context("Failed to run database migrations")?;
    }

    Ok(pool)
}
