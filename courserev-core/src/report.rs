//! Course report payload.
//!
//! Field names serialize in camelCase. Averages are `Option<f64>` and come out
//! as `null` for a section or course with no reviews.

use serde::Serialize;

use crate::expander::EnrichedSection;
use crate::model::{CourseId, CourseRecord, LecturerId, ReviewRecord};
use crate::stats::RatingTally;

/// One section with its reviews and statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionReport {
    pub course_id: CourseId,
    pub lecturer_id: LecturerId,
    pub lecturer_name: String,
    pub total_reviews: u64,
    pub average_section_rating: Option<f64>,
    pub reviews: Vec<ReviewRecord>,
    #[serde(skip)]
    tally: RatingTally,
}

impl SectionReport {
    pub fn new(section: EnrichedSection, reviews: Vec<ReviewRecord>) -> Self {
        let tally: RatingTally = reviews.iter().map(|r| r.rating).collect();

        Self {
            course_id: section.course_id,
            lecturer_id: section.lecturer_id,
            lecturer_name: section.lecturer_name,
            total_reviews: tally.count(),
            average_section_rating: tally.average(),
            reviews,
            tally,
        }
    }

    pub fn tally(&self) -> RatingTally {
        self.tally
    }
}

/// Course-level statistics derived from all section tallies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourseRollup {
    pub total_reviews: u64,
    pub average_course_rating: Option<f64>,
}

impl CourseRollup {
    /// Second pass over finished sections; order does not matter.
    pub fn from_sections(sections: &[SectionReport]) -> Self {
        let tally: RatingTally = sections.iter().map(SectionReport::tally).sum();

        Self {
            total_reviews: tally.count(),
            average_course_rating: tally.average(),
        }
    }
}

/// Full aggregated payload for one course number
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseReport {
    pub course_number: String,
    pub name: String,
    pub total_reviews: u64,
    pub average_course_rating: Option<f64>,
    pub sections: Vec<SectionReport>,
}

impl CourseReport {
    pub fn assemble(
        course: CourseRecord,
        sections: Vec<SectionReport>,
        rollup: CourseRollup,
    ) -> Self {
        Self {
            course_number: course.course_number,
            name: course.name,
            total_reviews: rollup.total_reviews,
            average_course_rating: rollup.average_course_rating,
            sections,
        }
    }
}
