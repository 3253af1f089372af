use thiserror::Error;

/// Failure raised by the score engine.
///
/// Catalog problems are reported as [`DataIntegrityError`] when the catalog
/// is built, so a [`Catalog`](crate::catalog::Catalog) reaching the engine is
/// always consistent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
    #[error("invalid scoring config: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),
}

/// The student's record or quiz answers cannot be scored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    #[error("academic record has no subjects")]
    EmptySubjects,
    #[error("unknown stream '{0}'")]
    UnknownStream(String),
    #[error("unknown interest question '{0}'")]
    UnknownInterest(String),
    #[error("rating for '{question}' must be between 1 and 5, got {rating}")]
    RatingOutOfRange { question: String, rating: i64 },
}

/// A catalog entry references something outside the fixed enumerations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataIntegrityError {
    #[error("course '{course_id}' references unknown interest question '{question}'")]
    UnknownInterestQuestion { course_id: String, question: String },
    #[error("course '{course_id}' references unknown stream '{stream}'")]
    UnknownStream { course_id: String, stream: String },
    #[error("course '{0}' is not open to any stream")]
    NoEligibleStreams(String),
    #[error("course '{course_id}' has invalid minimum grade '{grade}'")]
    InvalidMinimumGrade { course_id: String, grade: String },
    #[error("duplicate course id '{0}'")]
    DuplicateCourseId(String),
}
