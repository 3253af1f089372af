use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use super::stream::Stream;

/// A/L letter grade on the fixed ordinal scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    S,
    F,
}

impl Grade {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Grade::A),
            "B" => Some(Grade::B),
            "C" => Some(Grade::C),
            "S" => Some(Grade::S),
            "F" => Some(Grade::F),
            _ => None,
        }
    }

    pub const fn points(self) -> u8 {
        match self {
            Grade::A => 5,
            Grade::B => 4,
            Grade::C => 3,
            Grade::S => 2,
            Grade::F => 0,
        }
    }

    pub const fn letter(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::S => "S",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// One subject and the grade the student obtained, as entered.
///
/// The grade stays a raw string so that an unrecognized letter can be scored
/// as zero instead of rejecting the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectResult {
    pub name: String,
    pub grade: String,
}

impl SubjectResult {
    pub fn new(name: impl Into<String>, grade: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            grade: grade.into(),
        }
    }

    pub fn parsed_grade(&self) -> Option<Grade> {
        Grade::parse(&self.grade)
    }

    /// Grade points for this subject. Unrecognized grades count as F.
    pub fn points(&self) -> u8 {
        match self.parsed_grade() {
            Some(grade) => grade.points(),
            None => {
                warn!(
                    subject = %self.name,
                    grade = %self.grade,
                    "unrecognized grade, scoring as 0"
                );
                0
            }
        }
    }
}

/// A student's stream and subject results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicRecord {
    pub stream: Stream,
    pub subjects: Vec<SubjectResult>,
}

impl AcademicRecord {
    pub fn new(stream: Stream, subjects: Vec<SubjectResult>) -> Self {
        Self { stream, subjects }
    }

    /// Find the result for a subject by name, ignoring case.
    pub fn result_for(&self, subject: &str) -> Option<&SubjectResult> {
        let wanted = subject.trim();
        self.subjects
            .iter()
            .find(|s| s.name.trim().eq_ignore_ascii_case(wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_points() {
        assert_eq!(Grade::A.points(), 5);
        assert_eq!(Grade::B.points(), 4);
        assert_eq!(Grade::C.points(), 3);
        assert_eq!(Grade::S.points(), 2);
        assert_eq!(Grade::F.points(), 0);
    }

    #[test]
    fn test_grade_parse_trims_and_ignores_case() {
        assert_eq!(Grade::parse(" a "), Some(Grade::A));
        assert_eq!(Grade::parse("s"), Some(Grade::S));
        assert_eq!(Grade::parse("A+"), None);
        assert_eq!(Grade::parse(""), None);
    }

    #[test]
    fn test_unrecognized_grade_scores_zero() {
        let subject = SubjectResult::new("Physics", "Distinction");
        assert_eq!(subject.parsed_grade(), None);
        assert_eq!(subject.points(), 0);
    }

    #[test]
    fn test_result_for_is_case_insensitive() {
        let record = AcademicRecord::new(
            Stream::PhysicalScience,
            vec![
                SubjectResult::new("Physics", "A"),
                SubjectResult::new("Chemistry", "B"),
            ],
        );
        assert_eq!(record.result_for("physics").unwrap().grade, "A");
        assert!(record.result_for("Biology").is_none());
    }
}
