pub mod config;
pub mod engine;
pub mod error;
pub mod tier;
pub mod validation;

pub use config::*;
pub use engine::{
    academic_score, compute_recommendations, compute_recommendations_with, interest_score,
    RequirementGap, ScoredCourse,
};
pub use error::{DataIntegrityError, InvalidInputError, ScoringError};
pub use tier::{Tier, TierGroups};
pub use validation::validate_scoring;
