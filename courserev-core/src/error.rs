/// Structured error types for courserev-core.
///
/// Every way a course report can fail maps to exactly one `ReportError`
/// variant. Binary crates (courserev-cli) wrap these in `anyhow`; the HTTP
/// layer maps each variant to its own status code.

use thiserror::Error;

use crate::document::Collection;

/// Failure reported by a `DocumentStore` implementation
#[derive(Error, Debug)]
pub enum StoreError {
    /// Connection could not be established or was lost
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Query was rejected or failed while running
    #[error("query on {collection} failed: {reason}")]
    Query {
        collection: Collection,
        reason: String,
    },

    /// Store returned a document whose data is not a field map
    #[error("malformed {collection} document '{id}': {reason}")]
    Malformed {
        collection: Collection,
        id: String,
        reason: String,
    },
}

/// Main error type for course report operations
#[derive(Error, Debug)]
pub enum ReportError {
    /// A required request parameter was absent or blank
    #[error("missing required parameter '{name}'")]
    MissingParameter { name: &'static str },

    /// No course carries the requested course number
    #[error("no course with course number '{course_number}'")]
    NotFound { course_number: String },

    /// More than one course carries the course number (reject policy only)
    #[error("course number '{course_number}' matches {matches} courses")]
    AmbiguousMatch {
        course_number: String,
        matches: usize,
    },

    /// A stored reference points at a record that does not exist
    #[error("{referrer} references missing {collection} '{id}'")]
    DanglingReference {
        collection: Collection,
        id: String,
        referrer: String,
    },

    /// A stored document could not be decoded into its record type
    #[error("invalid {collection} document '{id}': {reason}")]
    InvalidDocument {
        collection: Collection,
        id: String,
        reason: String,
    },

    /// The store failed for infrastructure reasons
    #[error("upstream store unavailable: {source}")]
    UpstreamUnavailable {
        #[source]
        source: StoreError,
    },

    /// A single store call exceeded the configured timeout
    #[error("{operation} timed out after {millis}ms")]
    Timeout { operation: String, millis: u64 },
}

/// Malformed documents are data problems, not outages
impl From<StoreError> for ReportError {
    fn from(source: StoreError) -> Self {
        match source {
            StoreError::Malformed {
                collection,
                id,
                reason,
            } => Self::InvalidDocument {
                collection,
                id,
                reason,
            },
            source => Self::UpstreamUnavailable { source },
        }
    }
}

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

impl ReportError {
    /// Create a missing parameter error
    pub fn missing_parameter(name: &'static str) -> Self {
        Self::MissingParameter { name }
    }

    /// Create a not found error
    pub fn not_found(course_number: impl Into<String>) -> Self {
        Self::NotFound {
            course_number: course_number.into(),
        }
    }

    /// Create a dangling reference error
    pub fn dangling(
        collection: Collection,
        id: impl Into<String>,
        referrer: impl Into<String>,
    ) -> Self {
        Self::DanglingReference {
            collection,
            id: id.into(),
            referrer: referrer.into(),
        }
    }

    /// Create an invalid document error
    pub fn invalid_document(
        collection: Collection,
        id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidDocument {
            collection,
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Stable snake_case code for this error kind.
    ///
    /// Used as the `error` field of HTTP error bodies and in CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingParameter { .. } => "missing_parameter",
            Self::NotFound { .. } => "not_found",
            Self::AmbiguousMatch { .. } => "ambiguous_match",
            Self::DanglingReference { .. } => "dangling_reference",
            Self::InvalidDocument { .. } => "invalid_document",
            Self::UpstreamUnavailable { .. } => "upstream_unavailable",
            Self::Timeout { .. } => "timeout",
        }
    }
}
