//! Course report service: resolve, expand, aggregate, assemble.

use std::sync::Arc;

use tracing::Instrument;

use crate::aggregator::ReviewAggregator;
use crate::config::ReportOptions;
use crate::error::ReportError;
use crate::expander::SectionExpander;
use crate::model::CourseNumber;
use crate::report::CourseReport;
use crate::resolver::CourseResolver;
use crate::store::{DocumentStore, StoreClient};

/// Builds course reports against one document store.
///
/// Cheap to clone; clones share the store.
#[derive(Clone)]
pub struct CourseReportService {
    client: StoreClient,
    options: ReportOptions,
}

impl CourseReportService {
    pub fn new(store: Arc<dyn DocumentStore>, options: ReportOptions) -> Self {
        Self {
            client: StoreClient::new(store, options.call_timeout()),
            options,
        }
    }

    /// Build the full report for one course.
    ///
    /// Stages run in order, each gated on the previous one. Any failure aborts
    /// the report; no partial data is returned.
    pub async fn course_report(
        &self,
        course_number: &CourseNumber,
    ) -> Result<CourseReport, ReportError> {
        let span = tracing::info_span!("course_report", course_number = %course_number);
        self.build(course_number).instrument(span).await
    }

    async fn build(&self, course_number: &CourseNumber) -> Result<CourseReport, ReportError> {
        let (course_id, course) = CourseResolver::new(&self.client, self.options.duplicate_courses)
            .resolve(course_number)
            .await?;

        let sections = SectionExpander::new(
            &self.client,
            self.options.fan_out(),
            self.options.orphaned_sections,
        )
        .expand(&course_id)
        .await?;

        let (sections, rollup) = ReviewAggregator::new(&self.client, self.options.fan_out())
            .aggregate(sections)
            .await?;

        tracing::debug!(
            course_id = %course_id,
            sections = sections.len(),
            total_reviews = rollup.total_reviews,
            "Course report assembled"
        );

        Ok(CourseReport::assemble(course, sections, rollup))
    }
}
