//! Course report scenarios
//!
//! End-to-end runs of `CourseReportService` against a `MemoryStore` seeded
//! with the Kellogg catalogue: KIEI-451 taught by Brian Eng and Ben Block,
//! KIEI-925 taught by Brian Eng only.

use std::sync::Arc;

use courserev_core::{
    Collection, CourseNumber, CourseReportService, MemoryStore, OrphanPolicy, ReportError,
    ReportOptions,
};
use serde_json::json;

fn kellogg() -> MemoryStore {
    MemoryStore::new()
        .with(
            Collection::Courses,
            "c-451",
            json!({"courseNumber": "KIEI-451", "name": "Intro to Software Development"}),
        )
        .with(
            Collection::Courses,
            "c-925",
            json!({"courseNumber": "KIEI-925", "name": "Building Software Products"}),
        )
        .with(
            Collection::Courses,
            "c-empty",
            json!({"courseNumber": "KIEI-100", "name": "Not Offered"}),
        )
        .with(Collection::Lecturers, "brian", json!({"name": "Brian Eng"}))
        .with(Collection::Lecturers, "ben", json!({"name": "Ben Block"}))
        .with(
            Collection::Sections,
            "s-451-brian",
            json!({"courseId": "c-451", "lecturerId": "brian"}),
        )
        .with(
            Collection::Sections,
            "s-451-ben",
            json!({"courseId": "c-451", "lecturerId": "ben"}),
        )
        .with(
            Collection::Sections,
            "s-925-brian",
            json!({"courseId": "c-925", "lecturerId": "brian"}),
        )
        .with(
            Collection::Reviews,
            "r1",
            json!({"sectionId": "s-451-brian", "body": "Best class at Kellogg", "rating": 5}),
        )
        .with(
            Collection::Reviews,
            "r2",
            json!({"sectionId": "s-451-ben", "body": "Fine", "rating": 3}),
        )
        .with(
            Collection::Reviews,
            "r3",
            json!({"sectionId": "s-451-brian", "body": "", "rating": 4}),
        )
}

fn service(store: MemoryStore) -> CourseReportService {
    CourseReportService::new(Arc::new(store), ReportOptions::default())
}

fn number(s: &str) -> CourseNumber {
    CourseNumber::parse(Some(s)).unwrap()
}

#[tokio::test]
async fn kiei_451_scenario() {
    let report = service(kellogg())
        .course_report(&number("KIEI-451"))
        .await
        .unwrap();

    assert_eq!(report.course_number, "KIEI-451");
    assert_eq!(report.name, "Intro to Software Development");
    assert_eq!(report.sections.len(), 2);

    let brian = &report.sections[0];
    assert_eq!(brian.lecturer_name, "Brian Eng");
    assert_eq!(brian.total_reviews, 2);
    assert_eq!(brian.average_section_rating, Some(4.5));

    let ben = &report.sections[1];
    assert_eq!(ben.lecturer_name, "Ben Block");
    assert_eq!(ben.total_reviews, 1);
    assert_eq!(ben.average_section_rating, Some(3.0));

    assert_eq!(report.total_reviews, 3);
    assert_eq!(report.average_course_rating, Some(4.0));
}

#[tokio::test]
async fn report_json_shape() {
    let report = service(kellogg())
        .course_report(&number("KIEI-925"))
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        json!({
            "courseNumber": "KIEI-925",
            "name": "Building Software Products",
            "totalReviews": 0,
            "averageCourseRating": null,
            "sections": [{
                "courseId": "c-925",
                "lecturerId": "brian",
                "lecturerName": "Brian Eng",
                "totalReviews": 0,
                "averageSectionRating": null,
                "reviews": []
            }]
        })
    );
}

#[tokio::test]
async fn course_without_sections() {
    let report = service(kellogg())
        .course_report(&number("KIEI-100"))
        .await
        .unwrap();

    assert!(report.sections.is_empty());
    assert_eq!(report.total_reviews, 0);
    assert_eq!(report.average_course_rating, None);
}

#[tokio::test]
async fn empty_section_does_not_drag_course_average() {
    let store = kellogg().with(
        Collection::Sections,
        "s-451-guest",
        json!({"courseId": "c-451", "lecturerId": "ben"}),
    );

    let report = service(store)
        .course_report(&number("KIEI-451"))
        .await
        .unwrap();

    assert_eq!(report.sections.len(), 3);
    assert_eq!(report.sections[2].total_reviews, 0);
    assert_eq!(report.sections[2].average_section_rating, None);
    assert_eq!(report.average_course_rating, Some(4.0));
}

#[tokio::test]
async fn every_stored_review_appears_once() {
    let report = service(kellogg())
        .course_report(&number("KIEI-451"))
        .await
        .unwrap();

    let mut bodies: Vec<_> = report
        .sections
        .iter()
        .flat_map(|s| s.reviews.iter().map(|r| (r.section_id.as_str(), r.body.as_str())))
        .collect();
    bodies.sort_unstable();

    assert_eq!(
        bodies,
        [
            ("s-451-ben", "Fine"),
            ("s-451-brian", ""),
            ("s-451-brian", "Best class at Kellogg"),
        ]
    );

    let summed: u64 = report.sections.iter().map(|s| s.total_reviews).sum();
    assert_eq!(summed, report.total_reviews);
}

#[tokio::test]
async fn unknown_course_is_not_found() {
    let err = service(kellogg())
        .course_report(&number("KIEI-999"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ReportError::NotFound { ref course_number } if course_number == "KIEI-999"
    ));
}

#[tokio::test]
async fn dangling_lecturer_aborts_report() {
    let store = kellogg().with(
        Collection::Sections,
        "s-451-ghost",
        json!({"courseId": "c-451", "lecturerId": "ghost"}),
    );

    let err = service(store)
        .course_report(&number("KIEI-451"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "dangling_reference");
}

#[tokio::test]
async fn skipped_orphan_keeps_rollup_consistent() {
    let store = kellogg()
        .with(
            Collection::Sections,
            "s-451-ghost",
            json!({"courseId": "c-451", "lecturerId": "ghost"}),
        )
        .with(
            Collection::Reviews,
            "r-orphan",
            json!({"sectionId": "s-451-ghost", "body": "who?", "rating": 1}),
        );

    let options = ReportOptions {
        orphaned_sections: OrphanPolicy::Skip,
        ..ReportOptions::default()
    };
    let report = CourseReportService::new(Arc::new(store), options)
        .course_report(&number("KIEI-451"))
        .await
        .unwrap();

    assert_eq!(report.sections.len(), 2);
    assert_eq!(report.total_reviews, 3);
    assert_eq!(report.average_course_rating, Some(4.0));
}
