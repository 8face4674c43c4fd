//! One-shot course report printed to stdout

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use courserev_core::{CourseNumber, CourseReportService, ReportError};

use super::source::SourceArgs;
use crate::config::CourserevConfig;

#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Course number to report on (e.g. KIEI-451)
    pub course_number: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Prefix the error code so scripts can match on it
fn coded(err: ReportError) -> anyhow::Error {
    anyhow!("{}: {err}", err.code())
}

pub async fn run_report(args: ReportArgs, config: &CourserevConfig) -> Result<()> {
    let course_number = CourseNumber::parse(Some(args.course_number.as_str())).map_err(coded)?;

    let source = args.source.open(config, false).await?;
    let service = CourseReportService::new(source.store, config.report.clone());

    let report = service.course_report(&course_number).await.map_err(coded)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("Failed to serialize report")?;

    println!("{json}");
    Ok(())
}
