//! Section expansion: a course's sections with their lecturer names attached.

use futures::{stream, StreamExt, TryStreamExt};

use crate::config::OrphanPolicy;
use crate::document::{Collection, Document};
use crate::error::ReportError;
use crate::model::{CourseId, LecturerId, LecturerRecord, SectionId, SectionRecord, COURSE_ID_FIELD};
use crate::store::StoreClient;

/// Section plus the display name of the lecturer teaching it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedSection {
    pub id: SectionId,
    pub course_id: CourseId,
    pub lecturer_id: LecturerId,
    pub lecturer_name: String,
}

pub struct SectionExpander<'a> {
    client: &'a StoreClient,
    fan_out: usize,
    orphans: OrphanPolicy,
}

impl<'a> SectionExpander<'a> {
    pub fn new(client: &'a StoreClient, fan_out: usize, orphans: OrphanPolicy) -> Self {
        Self {
            client,
            fan_out: fan_out.max(1),
            orphans,
        }
    }

    /// All sections of a course in store order, each with `lecturer_name`.
    ///
    /// Lecturer lookups run concurrently, at most `fan_out` at a time. The
    /// first failure aborts the expansion.
    pub async fn expand(&self, course_id: &CourseId) -> Result<Vec<EnrichedSection>, ReportError> {
        let documents = self
            .client
            .find_by_field(Collection::Sections, COURSE_ID_FIELD, course_id.as_str())
            .await?;

        tracing::debug!(course_id = %course_id, sections = documents.len(), "Sections fetched");

        // Each lookup owns its inputs so the futures borrow nothing from `self`
        let lookups: Vec<_> = documents
            .into_iter()
            .map(|document| enrich(self.client.clone(), self.orphans, document))
            .collect();

        let enriched: Vec<Option<EnrichedSection>> = stream::iter(lookups)
            .buffered(self.fan_out)
            .try_collect()
            .await?;

        Ok(enriched.into_iter().flatten().collect())
    }
}

/// `None` when the lecturer is missing and orphans are skipped.
async fn enrich(
    client: StoreClient,
    orphans: OrphanPolicy,
    document: Document,
) -> Result<Option<EnrichedSection>, ReportError> {
    let section: SectionRecord = document.decode(Collection::Sections)?;
    let section_id = SectionId::from(document.id);

    let lecturer = client
        .get_by_id(Collection::Lecturers, section.lecturer_id.as_str())
        .await?;

    let Some(lecturer) = lecturer else {
        return match orphans {
            OrphanPolicy::Fail => Err(ReportError::dangling(
                Collection::Lecturers,
                section.lecturer_id.as_str(),
                format!("section '{section_id}'"),
            )),
            OrphanPolicy::Skip => {
                tracing::warn!(
                    section_id = %section_id,
                    lecturer_id = %section.lecturer_id,
                    "Skipping section with missing lecturer"
                );
                Ok(None)
            }
        };
    };

    let record: LecturerRecord = lecturer.decode(Collection::Lecturers)?;

    Ok(Some(EnrichedSection {
        id: section_id,
        course_id: section.course_id,
        lecturer_id: section.lecturer_id,
        lecturer_name: record.name,
    }))
}
