//! Course resolution: course number to course id and record.

use crate::config::DuplicateCoursePolicy;
use crate::document::Collection;
use crate::error::ReportError;
use crate::model::{CourseId, CourseNumber, CourseRecord, COURSE_NUMBER_FIELD};
use crate::store::StoreClient;

pub struct CourseResolver<'a> {
    client: &'a StoreClient,
    duplicates: DuplicateCoursePolicy,
}

impl<'a> CourseResolver<'a> {
    pub fn new(client: &'a StoreClient, duplicates: DuplicateCoursePolicy) -> Self {
        Self { client, duplicates }
    }

    /// Look up the single course carrying `course_number`.
    ///
    /// Zero matches is `NotFound`. Several matches break the uniqueness
    /// invariant; the duplicate policy decides between the first match in
    /// store order and `AmbiguousMatch`.
    pub async fn resolve(
        &self,
        course_number: &CourseNumber,
    ) -> Result<(CourseId, CourseRecord), ReportError> {
        let matches = self
            .client
            .find_by_field(Collection::Courses, COURSE_NUMBER_FIELD, course_number.as_str())
            .await?;

        if matches.len() > 1 {
            match self.duplicates {
                DuplicateCoursePolicy::First => {
                    tracing::warn!(
                        course_number = %course_number,
                        matches = matches.len(),
                        "Course number is not unique, using first match"
                    );
                }
                DuplicateCoursePolicy::Reject => {
                    return Err(ReportError::AmbiguousMatch {
                        course_number: course_number.to_string(),
                        matches: matches.len(),
                    });
                }
            }
        }

        let document = matches
            .into_iter()
            .next()
            .ok_or_else(|| ReportError::not_found(course_number.as_str()))?;

        let record: CourseRecord = document.decode(Collection::Courses)?;
        Ok((CourseId::from(document.id), record))
    }
}
