//! Domain records decoded from stored documents.
//!
//! Ids are opaque strings assigned by the store; each entity gets its own
//! newtype so a section id can never be passed where a course id belongs.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ReportError;

/// Stored field holding a course's external key
pub const COURSE_NUMBER_FIELD: &str = "courseNumber";
/// Stored field linking a section to its course
pub const COURSE_ID_FIELD: &str = "courseId";
/// Stored field linking a review to its section
pub const SECTION_ID_FIELD: &str = "sectionId";

macro_rules! document_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

document_id!(
    /// Id of a document in `courses`
    CourseId
);
document_id!(
    /// Id of a document in `lecturers`
    LecturerId
);
document_id!(
    /// Id of a document in `sections`
    SectionId
);

/// Course number as supplied by a caller, trimmed and known to be non-empty
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseNumber(String);

impl CourseNumber {
    /// Parse a raw request value.
    ///
    /// No format is imposed beyond presence: an absent value or one that is
    /// blank after trimming is `MissingParameter`.
    pub fn parse(raw: Option<&str>) -> Result<Self, ReportError> {
        match raw.map(str::trim) {
            Some(s) if !s.is_empty() => Ok(Self(s.to_owned())),
            _ => Err(ReportError::missing_parameter(COURSE_NUMBER_FIELD)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a stored rating was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatingError {
    #[error("rating {0} is outside 1..=5")]
    OutOfRange(String),

    #[error("rating {0} is not a whole number")]
    NotInteger(String),
}

/// Review rating, always within 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Number", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingError::OutOfRange(value.to_string()))
        }
    }
}

impl TryFrom<serde_json::Number> for Rating {
    type Error = RatingError;

    fn try_from(value: serde_json::Number) -> Result<Self, Self::Error> {
        // Document stores hand back 5.0 for a rating written as 5
        let whole = match (value.as_u64(), value.as_f64()) {
            (Some(n), _) => n,
            (None, Some(f)) if f.fract() == 0.0 && f >= 0.0 => f as u64,
            (None, Some(f)) if f.fract() != 0.0 => {
                return Err(RatingError::NotInteger(value.to_string()))
            }
            _ => return Err(RatingError::OutOfRange(value.to_string())),
        };

        u8::try_from(whole)
            .map_err(|_| RatingError::OutOfRange(value.to_string()))
            .and_then(Rating::try_from)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// `courses` document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub course_number: String,
    pub name: String,
}

/// `lecturers` document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LecturerRecord {
    pub name: String,
}

/// `sections` document: the join between one course and one lecturer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRecord {
    pub course_id: CourseId,
    pub lecturer_id: LecturerId,
}

/// `reviews` document; anonymous, attached to a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub section_id: SectionId,
    pub body: String,
    pub rating: Rating,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn course_number_trims() {
        let n = CourseNumber::parse(Some("  KIEI-451 ")).unwrap();
        assert_eq!(n.as_str(), "KIEI-451");
    }

    #[test]
    fn course_number_rejects_absent_and_blank() {
        for raw in [None, Some(""), Some("   ")] {
            let err = CourseNumber::parse(raw).unwrap_err();
            assert!(matches!(
                err,
                ReportError::MissingParameter {
                    name: COURSE_NUMBER_FIELD
                }
            ));
        }
    }

    #[test]
    fn rating_bounds() {
        assert!(Rating::try_from(0u8).is_err());
        assert_eq!(Rating::try_from(1u8).unwrap().get(), 1);
        assert_eq!(Rating::try_from(5u8).unwrap().get(), 5);
        assert!(Rating::try_from(6u8).is_err());
    }

    #[test]
    fn rating_from_json_numbers() {
        let r: Rating = serde_json::from_value(json!(4)).unwrap();
        assert_eq!(r.get(), 4);

        let r: Rating = serde_json::from_value(json!(3.0)).unwrap();
        assert_eq!(r.get(), 3);

        assert!(serde_json::from_value::<Rating>(json!(4.5)).is_err());
        assert!(serde_json::from_value::<Rating>(json!(-1)).is_err());
        assert!(serde_json::from_value::<Rating>(json!(300)).is_err());
        assert!(serde_json::from_value::<Rating>(json!("5")).is_err());
    }

    #[test]
    fn review_requires_body() {
        let missing_body = json!({"sectionId": "s1", "rating": 5});
        assert!(serde_json::from_value::<ReviewRecord>(missing_body).is_err());

        let empty_body = json!({"sectionId": "s1", "body": "", "rating": 5});
        let review: ReviewRecord = serde_json::from_value(empty_body).unwrap();
        assert!(review.body.is_empty());
    }

    #[test]
    fn review_serializes_camel_case() {
        let review = ReviewRecord {
            section_id: SectionId::new("s1"),
            body: "great".into(),
            rating: Rating::try_from(5u8).unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&review).unwrap(),
            json!({"sectionId": "s1", "body": "great", "rating": 5})
        );
    }
}
