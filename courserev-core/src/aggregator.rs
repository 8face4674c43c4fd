//! Review aggregation: per-section statistics, then the course rollup.

use futures::{stream, StreamExt, TryStreamExt};

use crate::document::Collection;
use crate::error::ReportError;
use crate::expander::EnrichedSection;
use crate::model::{ReviewRecord, SECTION_ID_FIELD};
use crate::report::{CourseRollup, SectionReport};
use crate::store::StoreClient;

pub struct ReviewAggregator<'a> {
    client: &'a StoreClient,
    fan_out: usize,
}

impl<'a> ReviewAggregator<'a> {
    pub fn new(client: &'a StoreClient, fan_out: usize) -> Self {
        Self {
            client,
            fan_out: fan_out.max(1),
        }
    }

    /// Fetch each section's reviews and fold them into section reports.
    ///
    /// Reports come back in the order the sections were given. The course
    /// rollup is derived afterwards from the finished reports, so no state is
    /// shared between the concurrent section fetches.
    pub async fn aggregate(
        &self,
        sections: Vec<EnrichedSection>,
    ) -> Result<(Vec<SectionReport>, CourseRollup), ReportError> {
        let fetches: Vec<_> = sections
            .into_iter()
            .map(|section| section_report(self.client.clone(), section))
            .collect();

        let reports: Vec<SectionReport> = stream::iter(fetches)
            .buffered(self.fan_out)
            .try_collect()
            .await?;

        let rollup = CourseRollup::from_sections(&reports);
        Ok((reports, rollup))
    }
}

async fn section_report(
    client: StoreClient,
    section: EnrichedSection,
) -> Result<SectionReport, ReportError> {
    let documents = client
        .find_by_field(Collection::Reviews, SECTION_ID_FIELD, section.id.as_str())
        .await?;

    let reviews = documents
        .iter()
        .map(|d| d.decode::<ReviewRecord>(Collection::Reviews))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(section_id = %section.id, reviews = reviews.len(), "Reviews fetched");

    Ok(SectionReport::new(section, reviews))
}
