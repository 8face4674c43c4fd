//! Database migrations for the document table

use sqlx::PgPool;

/// Create the document table and the lookup indexes reports rely on.
///
/// Idempotent; safe to run on every start.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running document store migrations...");

    // One table for all four collections; field data lives in JSONB
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            data JSONB NOT NULL CHECK (jsonb_typeof(data) = 'object'),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            PRIMARY KEY (collection, id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Expression indexes for the three equality filters
    for (name, collection, field) in [
        ("documents_courses_course_number", "courses", "courseNumber"),
        ("documents_sections_course_id", "sections", "courseId"),
        ("documents_reviews_section_id", "reviews", "sectionId"),
    ] {
        let ddl = format!(
            "CREATE INDEX IF NOT EXISTS {name} ON documents ((data ->> '{field}'), created_at) \
             WHERE collection = '{collection}'"
        );
        sqlx::query(&ddl).execute(pool).await?;
    }

    tracing::info!("Document store migrations complete");
    Ok(())
}
