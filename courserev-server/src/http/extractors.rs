//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use courserev_core::CourseNumber;

use super::error::ApiError;

/// Raw `?courseNumber=` query string
#[derive(Debug, Deserialize)]
struct CourseQuery {
    #[serde(rename = "courseNumber")]
    course_number: Option<String>,
}

/// Extract and validate a course number from the `courseNumber` query parameter
pub struct CourseNumberQuery(pub CourseNumber);

impl<S> FromRequestParts<S> for CourseNumberQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query): Query<CourseQuery> = Query::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest {
                message: e.body_text(),
            })?;

        let number = CourseNumber::parse(query.course_number.as_deref())?;
        Ok(Self(number))
    }
}

/// Extract and validate a course number from the path
pub struct CourseNumberPath(pub CourseNumber);

impl<S> FromRequestParts<S> for CourseNumberPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest {
                message: e.body_text(),
            })?;

        let number = CourseNumber::parse(Some(raw.as_str()))?;
        Ok(Self(number))
    }
}
