use super::config::{ScoringConfig, TierThreshold};
use crate::profile::interests::{MAX_RATING, MIN_RATING};

const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let resolved = config.resolve();

    // Weights
    for (field, value) in [
        ("academic_weight", resolved.academic_weight),
        ("interest_weight", resolved.interest_weight),
    ] {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            errors.push(format!("scoring.{}: must be between 0 and 1", field));
        }
    }
    let total = resolved.academic_weight + resolved.interest_weight;
    if (total - 1.0).abs() > WEIGHT_TOLERANCE {
        errors.push(format!(
            "scoring: academic_weight + interest_weight must equal 1 (got {})",
            total
        ));
    }

    // Ratings
    for (field, value) in [
        ("neutral_rating", resolved.neutral_rating),
        ("matching_rating", resolved.matching_rating),
    ] {
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            errors.push(format!(
                "scoring.{}: must be between {} and {}",
                field, MIN_RATING, MAX_RATING
            ));
        }
    }

    // Tier thresholds
    validate_threshold(
        "highly_recommended",
        &resolved.highly_recommended,
        &mut errors,
    );
    validate_threshold(
        "moderately_recommended",
        &resolved.moderately_recommended,
        &mut errors,
    );

    let highly = resolved.highly_recommended;
    let moderately = resolved.moderately_recommended;
    if highly.min_overall < moderately.min_overall || highly.min_academic < moderately.min_academic
    {
        errors.push(
            "scoring.highly_recommended: thresholds must not be below moderately_recommended"
                .to_string(),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_threshold(field: &str, threshold: &TierThreshold, errors: &mut Vec<String>) {
    if !threshold.min_overall.is_finite() || !(0.0..=1.0).contains(&threshold.min_overall) {
        errors.push(format!(
            "scoring.{}.min_overall: must be between 0 and 1",
            field
        ));
    }
    if !threshold.min_academic.is_finite() || !(0.0..=5.0).contains(&threshold.min_academic) {
        errors.push(format!(
            "scoring.{}.min_academic: must be between 0 and 5",
            field
        ));
    }
}
