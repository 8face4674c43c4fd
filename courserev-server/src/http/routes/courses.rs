//! Course report endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use courserev_core::{CourseNumber, CourseReport};

use crate::http::error::ApiError;
use crate::http::extractors::{CourseNumberPath, CourseNumberQuery};
use crate::http::server::AppState;

async fn report(state: &AppState, number: CourseNumber) -> Result<Json<CourseReport>, ApiError> {
    let report = state.reports.course_report(&number).await?;
    Ok(Json(report))
}

/// GET /courses?courseNumber=KIEI-451
async fn course_report_by_query(
    State(state): State<Arc<AppState>>,
    CourseNumberQuery(number): CourseNumberQuery,
) -> Result<Json<CourseReport>, ApiError> {
    report(&state, number).await
}

/// GET /courses/{course_number}
async fn course_report_by_path(
    State(state): State<Arc<AppState>>,
    CourseNumberPath(number): CourseNumberPath,
) -> Result<Json<CourseReport>, ApiError> {
    report(&state, number).await
}

/// Course routes
///
/// `/.netlify/functions/courses` is kept so existing clients of the
/// serverless deployment keep working unchanged.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/courses", get(course_report_by_query))
        .route("/courses/{course_number}", get(course_report_by_path))
        .route("/.netlify/functions/courses", get(course_report_by_query))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use courserev_core::{
        Collection, CourseReportService, Document, DocumentStore, DuplicateCoursePolicy,
        MemoryStore, ReportOptions, StoreError,
    };

    use crate::http::server::{build_router, AppState};

    fn kellogg() -> MemoryStore {
        MemoryStore::new()
            .with(
                Collection::Courses,
                "c-451",
                json!({"courseNumber": "KIEI-451", "name": "Intro to Software Development"}),
            )
            .with(Collection::Lecturers, "brian", json!({"name": "Brian Eng"}))
            .with(Collection::Lecturers, "ben", json!({"name": "Ben Block"}))
            .with(
                Collection::Sections,
                "s-brian",
                json!({"courseId": "c-451", "lecturerId": "brian"}),
            )
            .with(
                Collection::Sections,
                "s-ben",
                json!({"courseId": "c-451", "lecturerId": "ben"}),
            )
            .with(
                Collection::Reviews,
                "r1",
                json!({"sectionId": "s-brian", "body": "Great", "rating": 5}),
            )
            .with(
                Collection::Reviews,
                "r2",
                json!({"sectionId": "s-brian", "body": "Good", "rating": 4}),
            )
            .with(
                Collection::Reviews,
                "r3",
                json!({"sectionId": "s-ben", "body": "Okay", "rating": 3}),
            )
    }

    fn app_with(store: impl DocumentStore + 'static, options: ReportOptions) -> axum::Router {
        let state = AppState {
            reports: CourseReportService::new(std::sync::Arc::new(store), options),
            backend: "memory",
        };
        build_router(state, false)
    }

    fn app() -> axum::Router {
        app_with(kellogg(), ReportOptions::default())
    }

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn report_by_query() {
        let (status, body) = get(app(), "/courses?courseNumber=KIEI-451").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["courseNumber"], "KIEI-451");
        assert_eq!(body["totalReviews"], 3);
        assert_eq!(body["averageCourseRating"], 4.0);
        assert_eq!(body["sections"][0]["lecturerName"], "Brian Eng");
        assert_eq!(body["sections"][0]["averageSectionRating"], 4.5);
        assert_eq!(body["sections"][1]["totalReviews"], 1);
        assert_eq!(
            body["sections"][1]["reviews"],
            json!([{"sectionId": "s-ben", "body": "Okay", "rating": 3}])
        );
    }

    #[tokio::test]
    async fn report_by_path_and_legacy_alias_agree() {
        let (_, by_query) = get(app(), "/courses?courseNumber=KIEI-451").await;
        let (status, by_path) = get(app(), "/courses/KIEI-451").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(by_path, by_query);

        let legacy_uri = "/.netlify/functions/courses?courseNumber=KIEI-451";
        let (status, legacy) = get(app(), legacy_uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(legacy, by_query);
    }

    #[tokio::test]
    async fn missing_course_number_is_400() {
        for uri in ["/courses", "/courses?courseNumber=", "/courses?courseNumber=%20%20"] {
            let (status, body) = get(app(), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"], "missing_parameter");
        }
    }

    #[tokio::test]
    async fn unknown_course_is_404() {
        let (status, body) = get(app(), "/courses?courseNumber=KIEI-999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn duplicate_course_is_409_under_reject() {
        let store = kellogg().with(
            Collection::Courses,
            "c-451-copy",
            json!({"courseNumber": "KIEI-451", "name": "Duplicate"}),
        );
        let options = ReportOptions {
            duplicate_courses: DuplicateCoursePolicy::Reject,
            ..ReportOptions::default()
        };

        let (status, body) = get(app_with(store, options), "/courses?courseNumber=KIEI-451").await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "ambiguous_match");
    }

    #[tokio::test]
    async fn dangling_lecturer_is_500() {
        let store = kellogg().with(
            Collection::Sections,
            "s-ghost",
            json!({"courseId": "c-451", "lecturerId": "ghost"}),
        );

        let (status, body) = get(
            app_with(store, ReportOptions::default()),
            "/courses?courseNumber=KIEI-451",
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "dangling_reference");
    }

    struct DownStore;

    #[async_trait]
    impl DocumentStore for DownStore {
        async fn find_by_field(
            &self,
            _: Collection,
            _: &str,
            _: &str,
        ) -> Result<Vec<Document>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        async fn get_by_id(&self, _: Collection, _: &str) -> Result<Option<Document>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    struct HangingStore;

    #[async_trait]
    impl DocumentStore for HangingStore {
        async fn find_by_field(
            &self,
            _: Collection,
            _: &str,
            _: &str,
        ) -> Result<Vec<Document>, StoreError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Vec::new())
        }

        async fn get_by_id(&self, _: Collection, _: &str) -> Result<Option<Document>, StoreError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn store_outage_is_503() {
        let (status, body) = get(
            app_with(DownStore, ReportOptions::default()),
            "/courses?courseNumber=KIEI-451",
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "upstream_unavailable");
        assert!(!body["message"].as_str().unwrap().contains("connection refused"));
    }

    /// Returns the course, then a section whose stored data is not an object
    struct MalformedStore;

    #[async_trait]
    impl DocumentStore for MalformedStore {
        async fn find_by_field(
            &self,
            collection: Collection,
            _: &str,
            _: &str,
        ) -> Result<Vec<Document>, StoreError> {
            match collection {
                Collection::Courses => Ok(kellogg()
                    .find_by_field(collection, "courseNumber", "KIEI-451")
                    .await?),
                _ => Err(StoreError::Malformed {
                    collection,
                    id: "s-broken".into(),
                    reason: "holds a string instead of an object".into(),
                }),
            }
        }

        async fn get_by_id(&self, _: Collection, _: &str) -> Result<Option<Document>, StoreError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn malformed_stored_data_is_500() {
        let (status, body) = get(
            app_with(MalformedStore, ReportOptions::default()),
            "/courses?courseNumber=KIEI-451",
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "invalid_document");
    }

    #[tokio::test]
    async fn slow_store_is_504() {
        let options = ReportOptions {
            call_timeout_ms: 20,
            ..ReportOptions::default()
        };

        let app = app_with(HangingStore, options);
        let (status, body) = get(app, "/courses?courseNumber=KIEI-451").await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["error"], "timeout");
    }
}
