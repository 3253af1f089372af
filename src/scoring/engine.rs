use serde::Serialize;
use std::fmt;
use tracing::debug;

use super::config::{ResolvedScoring, ScoringConfig};
use super::error::{InvalidInputError, ScoringError};
use super::tier::Tier;
use super::validation::validate_scoring;
use crate::catalog::{Catalog, CourseRecord};
use crate::profile::interests::MAX_RATING;
use crate::profile::{AcademicRecord, Grade, InterestQuestion, InterestVector, SubjectResult};

/// Highest academic score (all A grades)
pub const MAX_ACADEMIC_SCORE: f64 = 5.0;

/// A required subject the student is missing or did not grade high enough in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequirementGap {
    Missing { subject: String },
    BelowMinimum {
        subject: String,
        grade: String,
        minimum: Grade,
    },
}

impl fmt::Display for RequirementGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequirementGap::Missing { subject } => write!(f, "{}: not taken", subject),
            RequirementGap::BelowMinimum {
                subject,
                grade,
                minimum,
            } => write!(f, "{}: {} below minimum {}", subject, grade, minimum),
        }
    }
}

/// A catalog course annotated with the student's scores and tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCourse<'a> {
    pub course: &'a CourseRecord,
    /// Mean grade points, 0-5
    pub academic_score: f64,
    /// Mean normalized interest rating, 0-1
    pub interest_score: f64,
    /// Weighted blend, 0-1
    pub overall_score: f64,
    pub tier: Tier,
    /// Course interests scoring at or above the matching rating, unanswered ones counted as neutral
    pub matching_interests: Vec<InterestQuestion>,
    /// Informational only; never affects the tier
    pub requirement_gaps: Vec<RequirementGap>,
}

/// Arithmetic mean of grade points across all subjects.
pub fn academic_score(subjects: &[SubjectResult]) -> Result<f64, InvalidInputError> {
    if subjects.is_empty() {
        return Err(InvalidInputError::EmptySubjects);
    }
    let total: u32 = subjects.iter().map(|s| s.points() as u32).sum();
    Ok(total as f64 / subjects.len() as f64)
}

/// Mean of `rating / 5` over the course's interest questions.
///
/// Unanswered questions count as `neutral`. A course with no interest
/// questions gets the neutral baseline `neutral / 5`.
pub fn interest_score(course: &CourseRecord, interests: &InterestVector, neutral: u8) -> f64 {
    let max = MAX_RATING as f64;
    if course.interests.is_empty() {
        return neutral as f64 / max;
    }
    let total: f64 = course
        .interests
        .iter()
        .map(|q| interests.effective_rating(*q, neutral) as f64 / max)
        .sum();
    total / course.interests.len() as f64
}

fn matching_interests(
    course: &CourseRecord,
    interests: &InterestVector,
    neutral: u8,
    matching_rating: u8,
) -> Vec<InterestQuestion> {
    course
        .interests
        .iter()
        .copied()
        .filter(|q| interests.effective_rating(*q, neutral) >= matching_rating)
        .collect()
}

fn requirement_gaps(course: &CourseRecord, record: &AcademicRecord) -> Vec<RequirementGap> {
    course
        .required_subjects
        .iter()
        .filter_map(|required| match record.result_for(required) {
            None => Some(RequirementGap::Missing {
                subject: required.clone(),
            }),
            Some(result) => {
                let minimum = course.minimum_grade?;
                let points = result.parsed_grade().map(Grade::points).unwrap_or(0);
                (points < minimum.points()).then(|| RequirementGap::BelowMinimum {
                    subject: required.clone(),
                    grade: result.grade.clone(),
                    minimum,
                })
            }
        })
        .collect()
}

/// Score one eligible course against a precomputed academic score.
fn score_course<'a>(
    course: &'a CourseRecord,
    record: &AcademicRecord,
    academic: f64,
    interests: &InterestVector,
    scoring: &ResolvedScoring,
) -> ScoredCourse<'a> {
    let interest = interest_score(course, interests, scoring.neutral_rating);
    let overall = scoring.academic_weight * (academic / MAX_ACADEMIC_SCORE)
        + scoring.interest_weight * interest;
    let tier = Tier::classify(overall, academic, scoring);

    debug!(
        course = %course.id,
        academic,
        interest,
        overall,
        tier = %tier,
        "scored course"
    );

    ScoredCourse {
        course,
        academic_score: academic,
        interest_score: interest,
        overall_score: overall,
        tier,
        matching_interests: matching_interests(
            course,
            interests,
            scoring.neutral_rating,
            scoring.matching_rating,
        ),
        requirement_gaps: requirement_gaps(course, record),
    }
}

/// Rank every catalog course open to the student's stream, using the
/// default weights and thresholds.
pub fn compute_recommendations<'a>(
    record: &AcademicRecord,
    interests: &InterestVector,
    catalog: &'a Catalog,
) -> Result<Vec<ScoredCourse<'a>>, ScoringError> {
    compute_recommendations_with(record, interests, catalog, &ScoringConfig::default())
}

/// Rank every catalog course open to the student's stream.
///
/// Results are sorted by overall score, highest first; ties keep catalog
/// order. A stream with no eligible courses yields an empty list. The config
/// is validated first, so every score stays within its range.
pub fn compute_recommendations_with<'a>(
    record: &AcademicRecord,
    interests: &InterestVector,
    catalog: &'a Catalog,
    config: &ScoringConfig,
) -> Result<Vec<ScoredCourse<'a>>, ScoringError> {
    validate_scoring(config).map_err(ScoringError::InvalidConfig)?;
    let scoring = config.resolve();
    let academic = academic_score(&record.subjects)?;

    let mut scored: Vec<ScoredCourse<'a>> = catalog
        .for_stream(record.stream)
        .map(|course| score_course(course, record, academic, interests, &scoring))
        .collect();

    scored.sort_by(|a, b| b.overall_score.total_cmp(&a.overall_score));

    debug!(
        stream = %record.stream,
        academic,
        eligible = scored.len(),
        "computed recommendations"
    );

    Ok(scored)
}
