//! courserev-server: HTTP API for course review reports
//!
//! Serves `CourseReportService` over axum, backed either by the Postgres
//! document store in `db` or by any other `DocumentStore`.

pub mod db;
pub mod http;

pub use db::PgDocumentStore;
pub use http::{build_router, run_server, AppState, ServerConfig};
