use serde::{Deserialize, Serialize};

pub const DEFAULT_ACADEMIC_WEIGHT: f64 = 0.6;
pub const DEFAULT_INTEREST_WEIGHT: f64 = 0.4;
pub const DEFAULT_NEUTRAL_RATING: u8 = 3;
pub const DEFAULT_MATCHING_RATING: u8 = 3;

/// Main scoring configuration.
///
/// Every field is optional; a missing field falls back to the default
/// weighting (60% academic, 40% interest) and tier thresholds.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   academic_weight: 0.6
///   interest_weight: 0.4
///   neutral_rating: 3
///   highly_recommended: { min_overall: 0.75, min_academic: 3.5 }
///   moderately_recommended: { min_overall: 0.55, min_academic: 2.5 }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Weight of the normalized academic score (default: 0.6)
    #[serde(default)]
    pub academic_weight: Option<f64>,

    /// Weight of the interest score (default: 0.4)
    #[serde(default)]
    pub interest_weight: Option<f64>,

    /// Rating assumed for unanswered interest questions (default: 3)
    #[serde(default)]
    pub neutral_rating: Option<u8>,

    /// Lowest explicit rating reported as a matching interest (default: 3)
    #[serde(default)]
    pub matching_rating: Option<u8>,

    #[serde(default)]
    pub highly_recommended: Option<TierThreshold>,

    #[serde(default)]
    pub moderately_recommended: Option<TierThreshold>,
}

/// Both bounds must hold for a course to reach the tier.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TierThreshold {
    /// Minimum overall score, 0-1
    pub min_overall: f64,

    /// Minimum academic score, 0-5
    pub min_academic: f64,
}

impl TierThreshold {
    pub const HIGHLY_RECOMMENDED: Self = Self {
        min_overall: 0.75,
        min_academic: 3.5,
    };

    pub const MODERATELY_RECOMMENDED: Self = Self {
        min_overall: 0.55,
        min_academic: 2.5,
    };

    pub fn admits(&self, overall: f64, academic: f64) -> bool {
        overall >= self.min_overall && academic >= self.min_academic
    }
}

/// Scoring parameters with every default filled in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedScoring {
    pub academic_weight: f64,
    pub interest_weight: f64,
    pub neutral_rating: u8,
    pub matching_rating: u8,
    pub highly_recommended: TierThreshold,
    pub moderately_recommended: TierThreshold,
}

impl Default for ResolvedScoring {
    fn default() -> Self {
        ScoringConfig::default().resolve()
    }
}

impl ScoringConfig {
    pub fn resolve(&self) -> ResolvedScoring {
        ResolvedScoring {
            academic_weight: self.academic_weight.unwrap_or(DEFAULT_ACADEMIC_WEIGHT),
            interest_weight: self.interest_weight.unwrap_or(DEFAULT_INTEREST_WEIGHT),
            neutral_rating: self.neutral_rating.unwrap_or(DEFAULT_NEUTRAL_RATING),
            matching_rating: self.matching_rating.unwrap_or(DEFAULT_MATCHING_RATING),
            highly_recommended: self
                .highly_recommended
                .unwrap_or(TierThreshold::HIGHLY_RECOMMENDED),
            moderately_recommended: self
                .moderately_recommended
                .unwrap_or(TierThreshold::MODERATELY_RECOMMENDED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolves_to_documented_values() {
        let resolved = ScoringConfig::default().resolve();
        assert_eq!(resolved.academic_weight, 0.6);
        assert_eq!(resolved.interest_weight, 0.4);
        assert_eq!(resolved.neutral_rating, 3);
        assert_eq!(resolved.matching_rating, 3);
        assert_eq!(resolved.highly_recommended.min_overall, 0.75);
        assert_eq!(resolved.highly_recommended.min_academic, 3.5);
        assert_eq!(resolved.moderately_recommended.min_overall, 0.55);
        assert_eq!(resolved.moderately_recommended.min_academic, 2.5);
    }

    #[test]
    fn test_partial_scoring_config_parse() {
        let yaml = r#"
academic_weight: 0.7
interest_weight: 0.3
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        let resolved = config.resolve();
        assert_eq!(resolved.academic_weight, 0.7);
        assert_eq!(resolved.interest_weight, 0.3);
        assert_eq!(resolved.highly_recommended, TierThreshold::HIGHLY_RECOMMENDED);
    }

    #[test]
    fn test_full_scoring_config_parse() {
        let yaml = r#"
academic_weight: 0.5
interest_weight: 0.5
neutral_rating: 2
matching_rating: 4
highly_recommended:
  min_overall: 0.8
  min_academic: 4.0
moderately_recommended:
  min_overall: 0.6
  min_academic: 3.0
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        let resolved = config.resolve();
        assert_eq!(resolved.neutral_rating, 2);
        assert_eq!(resolved.matching_rating, 4);
        assert_eq!(resolved.highly_recommended.min_academic, 4.0);
        assert_eq!(resolved.moderately_recommended.min_overall, 0.6);
    }

    #[test]
    fn test_empty_scoring_config_parse() {
        let config: ScoringConfig = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, ScoringConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "academic_wieght: 0.6\n";
        assert!(serde_saphyr::from_str::<ScoringConfig>(yaml).is_err());
    }

    #[test]
    fn test_threshold_requires_both_bounds() {
        let t = TierThreshold::HIGHLY_RECOMMENDED;
        assert!(t.admits(0.75, 3.5));
        assert!(!t.admits(0.95, 3.4));
        assert!(!t.admits(0.74, 5.0));
    }
}
