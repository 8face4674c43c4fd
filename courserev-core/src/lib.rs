//! courserev-core: course review rollups over a document store.
//!
//! A report for one course number is built in three stages: the course is
//! resolved, its sections are expanded with lecturer names, and each
//! section's reviews are folded into section and course statistics.

pub mod aggregator;
pub mod config;
pub mod document;
pub mod error;
pub mod expander;
pub mod fixture;
pub mod memory;
pub mod model;
pub mod report;
pub mod resolver;
pub mod service;
pub mod stats;
pub mod store;

pub use config::{DuplicateCoursePolicy, OrphanPolicy, ReportOptions};
pub use document::{Collection, Document, Fields};
pub use error::{ReportError, Result, StoreError};
pub use fixture::{load_store, Fixture, FixtureError};
pub use memory::MemoryStore;
pub use model::{CourseNumber, Rating, ReviewRecord};
pub use report::{CourseReport, CourseRollup, SectionReport};
pub use service::CourseReportService;
pub use stats::RatingTally;
pub use store::{DocumentStore, StoreClient};
