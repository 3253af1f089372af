use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::profile::Stream;
use crate::scoring::ScoredCourse;

/// Machine-readable recommendation report.
#[derive(Debug, Serialize)]
pub struct RecommendationReport<'s, 'a> {
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<&'s str>,
    pub stream: Stream,
    pub academic_score: f64,
    /// Courses eligible before any top-N slicing
    pub total_eligible: usize,
    pub recommendations: &'s [ScoredCourse<'a>],
}

impl<'s, 'a> RecommendationReport<'s, 'a> {
    pub fn new(
        student: Option<&'s str>,
        stream: Stream,
        academic_score: f64,
        total_eligible: usize,
        recommendations: &'s [ScoredCourse<'a>],
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            student,
            stream,
            academic_score,
            total_eligible,
            recommendations,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::profile::{AcademicRecord, InterestVector, SubjectResult};
    use crate::scoring::compute_recommendations;

    #[test]
    fn test_report_json_shape() {
        let catalog = Catalog::builtin().unwrap();
        let record = AcademicRecord::new(
            Stream::Commerce,
            vec![
                SubjectResult::new("Accounting", "A"),
                SubjectResult::new("Economics", "B"),
                SubjectResult::new("Business Studies", "B"),
            ],
        );
        let courses =
            compute_recommendations(&record, &InterestVector::default(), &catalog).unwrap();
        let report = RecommendationReport::new(
            Some("Kasun"),
            Stream::Commerce,
            4.33,
            courses.len(),
            &courses,
        );

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["student"], "Kasun");
        assert_eq!(json["stream"], "Commerce");
        assert_eq!(json["total_eligible"], courses.len());
        let first = &json["recommendations"][0];
        assert!(first["course"]["id"].is_string());
        assert!(first["overall_score"].is_f64());
        let tier = first["tier"].as_str().unwrap();
        assert!(tier.ends_with("recommended") || tier == "conditionally-eligible");
    }

    #[test]
    fn test_report_omits_missing_student() {
        let report = RecommendationReport::new(None, Stream::Arts, 3.0, 0, &[]);
        let json = report.to_json().unwrap();
        assert!(!json.contains("student"));
        assert!(json.contains("\"recommendations\": []"));
    }
}
