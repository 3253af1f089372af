use serde::{Deserialize, Serialize};

use crate::profile::{Grade, InterestQuestion, Stream};

/// Course entry as written in a catalog file.
///
/// Streams and interests stay as strings here so that an unknown value is
/// reported as a catalog integrity failure naming the course, rather than as
/// a bare parse error.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CourseEntry {
    pub id: String,
    pub name: String,
    pub university: String,

    #[serde(default)]
    pub description: String,

    /// Streams whose students may apply
    pub streams: Vec<String>,

    /// Interest question ids this course correlates with
    #[serde(default)]
    pub interests: Vec<String>,

    #[serde(default)]
    pub required_subjects: Vec<String>,

    /// Lowest grade accepted in each required subject
    #[serde(default)]
    pub minimum_grade: Option<String>,

    /// Supplementary aptitude tests; empty when none are required
    #[serde(default)]
    pub aptitude_tests: Vec<String>,
}

/// Validated, immutable course+university record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseRecord {
    pub id: String,
    pub name: String,
    pub university: String,
    pub description: String,
    pub streams: Vec<Stream>,
    pub interests: Vec<InterestQuestion>,
    pub required_subjects: Vec<String>,
    pub minimum_grade: Option<Grade>,
    pub aptitude_tests: Vec<String>,
}

impl CourseRecord {
    pub fn accepts(&self, stream: Stream) -> bool {
        self.streams.contains(&stream)
    }

    pub fn requires_aptitude_test(&self) -> bool {
        !self.aptitude_tests.is_empty()
    }

    /// "Course Name - University"
    pub fn title(&self) -> String {
        format!("{} - {}", self.name, self.university)
    }
}
