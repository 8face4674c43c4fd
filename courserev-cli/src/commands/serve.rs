//! HTTP server command
//!
//! Serves course reports from Postgres or from a fixture file.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use courserev_core::CourseReportService;
use courserev_server::http::{run_server, AppState, ServerConfig};

use super::source::SourceArgs;
use crate::config::CourserevConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: [server] bind, else 127.0.0.1:3030)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: &CourserevConfig) -> Result<()> {
    // Migrations only matter for Postgres; a fixture source ignores the flag
    let source = args.source.open(config, true).await?;

    let server_config = ServerConfig {
        bind_addr: args.bind.unwrap_or(config.server.bind),
        cors_permissive: args.cors_permissive || config.server.cors_permissive,
    };

    tracing::info!(
        backend = source.backend,
        "Starting courserev server on {}",
        server_config.bind_addr
    );

    let state = AppState {
        reports: CourseReportService::new(source.store, config.report.clone()),
        backend: source.backend,
    };

    // Run server (blocks until shutdown)
    run_server(state, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
