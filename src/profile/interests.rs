use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::scoring::error::InvalidInputError;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// The twelve questions of the career interest quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterestQuestion {
    StructuralDesign,
    Technology,
    Fieldwork,
    Mathematics,
    DataAnalysis,
    Innovation,
    CreativeDesign,
    ProblemSolving,
    Sustainability,
    Leadership,
    Healthcare,
    Business,
}

impl InterestQuestion {
    pub const COUNT: usize = 12;

    pub const fn all() -> [Self; Self::COUNT] {
        [
            Self::StructuralDesign,
            Self::Technology,
            Self::Fieldwork,
            Self::Mathematics,
            Self::DataAnalysis,
            Self::Innovation,
            Self::CreativeDesign,
            Self::ProblemSolving,
            Self::Sustainability,
            Self::Leadership,
            Self::Healthcare,
            Self::Business,
        ]
    }

    /// 1-based position in the quiz.
    pub fn number(self) -> u8 {
        Self::all()
            .iter()
            .position(|q| *q == self)
            .map(|i| i as u8 + 1)
            .unwrap_or(0)
    }

    pub fn from_number(n: u8) -> Option<Self> {
        let idx = (n as usize).checked_sub(1)?;
        Self::all().get(idx).copied()
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::StructuralDesign => "structural-design",
            Self::Technology => "technology",
            Self::Fieldwork => "fieldwork",
            Self::Mathematics => "mathematics",
            Self::DataAnalysis => "data-analysis",
            Self::Innovation => "innovation",
            Self::CreativeDesign => "creative-design",
            Self::ProblemSolving => "problem-solving",
            Self::Sustainability => "sustainability",
            Self::Leadership => "leadership",
            Self::Healthcare => "healthcare",
            Self::Business => "business",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::StructuralDesign => "Structural design",
            Self::Technology => "Technology",
            Self::Fieldwork => "Fieldwork",
            Self::Mathematics => "Mathematics",
            Self::DataAnalysis => "Data analysis",
            Self::Innovation => "Innovation",
            Self::CreativeDesign => "Creative design",
            Self::ProblemSolving => "Problem solving",
            Self::Sustainability => "Sustainability",
            Self::Leadership => "Leadership",
            Self::Healthcare => "Healthcare",
            Self::Business => "Business",
        }
    }

    pub const fn prompt(self) -> &'static str {
        match self {
            Self::StructuralDesign => "How interested are you in designing structures or buildings?",
            Self::Technology => "How much do you enjoy working with computers and technology?",
            Self::Fieldwork => "How much would you like fieldwork over office-based work?",
            Self::Mathematics => "How interested are you in mathematics and calculations?",
            Self::DataAnalysis => "How much do you enjoy working with data?",
            Self::Innovation => "How interested are you in innovation and new technologies?",
            Self::CreativeDesign => "How much do you enjoy creative and artistic work?",
            Self::ProblemSolving => "Do you enjoy problem-solving and analytical thinking?",
            Self::Sustainability => {
                "How interested are you in sustainable development and environment?"
            }
            Self::Leadership => "How much do you enjoy leading teams and taking charge?",
            Self::Healthcare => "How interested are you in caring for people's health?",
            Self::Business => "How interested are you in business, finance, and management?",
        }
    }

    /// Accepts the question id (`data-analysis`, `data_analysis`) or its number (`5`).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u8>() {
            return Self::from_number(n);
        }
        let normalized = s.to_ascii_lowercase().replace(['_', ' '], "-");
        Self::all().into_iter().find(|q| q.id() == normalized)
    }
}

impl fmt::Display for InterestQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Self-reported interest ratings. Questions without an answer are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterestVector {
    ratings: BTreeMap<InterestQuestion, u8>,
}

impl InterestVector {
    /// Build a vector from answers, rejecting ratings outside 1-5.
    /// A question answered twice keeps the last rating.
    pub fn new<I>(answers: I) -> Result<Self, InvalidInputError>
    where
        I: IntoIterator<Item = (InterestQuestion, i64)>,
    {
        let mut ratings = BTreeMap::new();
        for (question, rating) in answers {
            if rating < MIN_RATING as i64 || rating > MAX_RATING as i64 {
                return Err(InvalidInputError::RatingOutOfRange {
                    question: question.id().to_string(),
                    rating,
                });
            }
            ratings.insert(question, rating as u8);
        }
        Ok(Self { ratings })
    }

    /// Same rating for every question.
    pub fn uniform(rating: u8) -> Result<Self, InvalidInputError> {
        Self::new(
            InterestQuestion::all()
                .into_iter()
                .map(|q| (q, rating as i64)),
        )
    }

    pub fn rating(&self, question: InterestQuestion) -> Option<u8> {
        self.ratings.get(&question).copied()
    }

    pub fn effective_rating(&self, question: InterestQuestion, neutral: u8) -> u8 {
        self.rating(question).unwrap_or(neutral)
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (InterestQuestion, u8)> + '_ {
        self.ratings.iter().map(|(q, r)| (*q, *r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_questions_numbered_in_order() {
        let all = InterestQuestion::all();
        assert_eq!(all.len(), 12);
        for (i, q) in all.iter().enumerate() {
            assert_eq!(q.number() as usize, i + 1);
            assert_eq!(InterestQuestion::from_number(q.number()), Some(*q));
        }
        assert_eq!(InterestQuestion::from_number(0), None);
        assert_eq!(InterestQuestion::from_number(13), None);
    }

    #[test]
    fn test_parse_by_id_and_number() {
        assert_eq!(
            InterestQuestion::parse("data-analysis"),
            Some(InterestQuestion::DataAnalysis)
        );
        assert_eq!(
            InterestQuestion::parse("Problem_Solving"),
            Some(InterestQuestion::ProblemSolving)
        );
        assert_eq!(InterestQuestion::parse("2"), Some(InterestQuestion::Technology));
        assert_eq!(InterestQuestion::parse("astrology"), None);
    }

    #[test]
    fn test_serde_id_matches_id_fn() {
        for q in InterestQuestion::all() {
            let json = serde_json::to_string(&q).unwrap();
            assert_eq!(json, format!("\"{}\"", q.id()));
        }
    }

    #[test]
    fn test_vector_rejects_out_of_range() {
        let result = InterestVector::new([(InterestQuestion::Technology, 6)]);
        assert_eq!(
            result,
            Err(InvalidInputError::RatingOutOfRange {
                question: "technology".to_string(),
                rating: 6
            })
        );
        assert!(InterestVector::new([(InterestQuestion::Technology, 0)]).is_err());
    }

    #[test]
    fn test_missing_rating_uses_neutral() {
        let vector = InterestVector::new([(InterestQuestion::Technology, 5)]).unwrap();
        assert_eq!(vector.rating(InterestQuestion::Business), None);
        assert_eq!(vector.effective_rating(InterestQuestion::Business, 3), 3);
        assert_eq!(vector.effective_rating(InterestQuestion::Technology, 3), 5);
    }

    #[test]
    fn test_duplicate_answer_keeps_last() {
        let vector = InterestVector::new([
            (InterestQuestion::Leadership, 2),
            (InterestQuestion::Leadership, 4),
        ])
        .unwrap();
        assert_eq!(vector.len(), 1);
        assert_eq!(vector.rating(InterestQuestion::Leadership), Some(4));
    }
}
