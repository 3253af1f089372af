use serde::{Deserialize, Serialize};
use std::fmt;

use super::config::ResolvedScoring;
use super::engine::ScoredCourse;

/// Recommendation strength. Variants are listed strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    HighlyRecommended,
    ModeratelyRecommended,
    ConditionallyEligible,
}

impl Tier {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::HighlyRecommended,
            Self::ModeratelyRecommended,
            Self::ConditionallyEligible,
        ]
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::HighlyRecommended => "highly-recommended",
            Self::ModeratelyRecommended => "moderately-recommended",
            Self::ConditionallyEligible => "conditionally-eligible",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::HighlyRecommended => "Highly Recommended",
            Self::ModeratelyRecommended => "Moderately Recommended",
            Self::ConditionallyEligible => "Conditionally Eligible",
        }
    }

    /// First tier whose overall and academic floors are both met.
    pub fn classify(overall: f64, academic: f64, scoring: &ResolvedScoring) -> Self {
        if scoring.highly_recommended.admits(overall, academic) {
            Self::HighlyRecommended
        } else if scoring.moderately_recommended.admits(overall, academic) {
            Self::ModeratelyRecommended
        } else {
            Self::ConditionallyEligible
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Ranked results split by tier. Each group keeps the ranked order.
#[derive(Debug)]
pub struct TierGroups<'s, 'a> {
    pub highly_recommended: Vec<&'s ScoredCourse<'a>>,
    pub moderately_recommended: Vec<&'s ScoredCourse<'a>>,
    pub conditionally_eligible: Vec<&'s ScoredCourse<'a>>,
}

impl<'s, 'a> TierGroups<'s, 'a> {
    pub fn from_scored(scored: &'s [ScoredCourse<'a>]) -> Self {
        let pick = |tier: Tier| scored.iter().filter(|s| s.tier == tier).collect::<Vec<_>>();
        Self {
            highly_recommended: pick(Tier::HighlyRecommended),
            moderately_recommended: pick(Tier::ModeratelyRecommended),
            conditionally_eligible: pick(Tier::ConditionallyEligible),
        }
    }

    pub fn get(&self, tier: Tier) -> &[&'s ScoredCourse<'a>] {
        match tier {
            Tier::HighlyRecommended => &self.highly_recommended,
            Tier::ModeratelyRecommended => &self.moderately_recommended,
            Tier::ConditionallyEligible => &self.conditionally_eligible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_default_thresholds() {
        let scoring = ResolvedScoring::default();
        assert_eq!(Tier::classify(0.96, 4.67, &scoring), Tier::HighlyRecommended);
        assert_eq!(Tier::classify(0.75, 3.5, &scoring), Tier::HighlyRecommended);
        assert_eq!(Tier::classify(0.60, 3.0, &scoring), Tier::ModeratelyRecommended);
        assert_eq!(Tier::classify(0.40, 0.0, &scoring), Tier::ConditionallyEligible);
    }

    #[test]
    fn test_academic_floor_blocks_higher_tiers() {
        let scoring = ResolvedScoring::default();
        // High overall but academic below both floors
        assert_eq!(Tier::classify(0.90, 2.4, &scoring), Tier::ConditionallyEligible);
        // Overall qualifies for highly, academic only for moderately
        assert_eq!(Tier::classify(0.90, 3.0, &scoring), Tier::ModeratelyRecommended);
    }

    #[test]
    fn test_tier_serde_ids() {
        for tier in Tier::ordered() {
            let json = serde_json::to_string(&tier).unwrap();
            assert_eq!(json, format!("\"{}\"", tier.id()));
        }
    }
}
