mod types;

pub use types::{CourseEntry, CourseRecord};

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::profile::{Grade, InterestQuestion, Stream};
use crate::scoring::error::DataIntegrityError;

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.yaml");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    courses: Vec<CourseEntry>,
}

/// Read-only collection of courses, in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    courses: Vec<CourseRecord>,
}

impl Catalog {
    /// Validate raw entries and build the catalog.
    ///
    /// Fails on the first entry that references an unknown stream or interest
    /// question, has no streams, has an invalid minimum grade, or repeats an id.
    pub fn from_entries(entries: Vec<CourseEntry>) -> Result<Self, DataIntegrityError> {
        let mut seen = HashSet::new();
        let mut courses = Vec::with_capacity(entries.len());

        for entry in entries {
            if !seen.insert(entry.id.clone()) {
                return Err(DataIntegrityError::DuplicateCourseId(entry.id));
            }
            if entry.streams.is_empty() {
                return Err(DataIntegrityError::NoEligibleStreams(entry.id));
            }

            let streams = entry
                .streams
                .iter()
                .map(|s| {
                    Stream::parse(s).ok_or_else(|| DataIntegrityError::UnknownStream {
                        course_id: entry.id.clone(),
                        stream: s.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let interests = entry
                .interests
                .iter()
                .map(|q| {
                    InterestQuestion::parse(q).ok_or_else(|| {
                        DataIntegrityError::UnknownInterestQuestion {
                            course_id: entry.id.clone(),
                            question: q.clone(),
                        }
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let minimum_grade = match entry.minimum_grade {
                Some(ref g) => Some(Grade::parse(g).ok_or_else(|| {
                    DataIntegrityError::InvalidMinimumGrade {
                        course_id: entry.id.clone(),
                        grade: g.clone(),
                    }
                })?),
                None => None,
            };

            courses.push(CourseRecord {
                id: entry.id,
                name: entry.name,
                university: entry.university,
                description: entry.description,
                streams,
                interests,
                required_subjects: entry.required_subjects,
                minimum_grade,
                aptitude_tests: entry.aptitude_tests,
            });
        }

        Ok(Self { courses })
    }

    /// Parse a YAML catalog document (`courses:` list).
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_saphyr::from_str(yaml).context("Failed to parse catalog YAML")?;
        Ok(Self::from_entries(file.courses)?)
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_CATALOG).context("Built-in catalog is invalid")
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CourseRecord> {
        self.courses.iter()
    }

    pub fn get(&self, id: &str) -> Option<&CourseRecord> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Courses open to `stream`, in catalog order.
    pub fn for_stream(&self, stream: Stream) -> impl Iterator<Item = &CourseRecord> {
        self.courses.iter().filter(move |c| c.accepts(stream))
    }
}

/// Load a catalog from a YAML file, or the built-in catalog when `path` is None.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let catalog = match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read catalog at {}", path.display()))?;
            Catalog::from_yaml(&content)
                .with_context(|| format!("Invalid catalog in {}", path.display()))?
        }
        None => Catalog::builtin()?,
    };

    info!(courses = catalog.len(), "catalog loaded");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, streams: &[&str], interests: &[&str]) -> CourseEntry {
        CourseEntry {
            id: id.to_string(),
            name: format!("Course {}", id),
            university: "University of Colombo".to_string(),
            description: String::new(),
            streams: streams.iter().map(|s| s.to_string()).collect(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            required_subjects: vec![],
            minimum_grade: None,
            aptitude_tests: vec![],
        }
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        for stream in Stream::all() {
            assert!(
                catalog.for_stream(stream).next().is_some(),
                "no built-in course for {}",
                stream
            );
        }
    }

    #[test]
    fn test_from_entries_normalizes_streams() {
        let catalog =
            Catalog::from_entries(vec![entry("a", &["bio science", "Physical Science"], &[])])
                .unwrap();
        let course = catalog.get("a").unwrap();
        assert_eq!(
            course.streams,
            vec![Stream::BiologicalScience, Stream::PhysicalScience]
        );
    }

    #[test]
    fn test_unknown_interest_fails_fast() {
        let result = Catalog::from_entries(vec![
            entry("a", &["Arts"], &["leadership"]),
            entry("b", &["Arts"], &["astrology"]),
        ]);
        assert_eq!(
            result.unwrap_err(),
            DataIntegrityError::UnknownInterestQuestion {
                course_id: "b".to_string(),
                question: "astrology".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_stream_rejected() {
        let result = Catalog::from_entries(vec![entry("a", &["Astronomy"], &[])]);
        assert!(matches!(
            result,
            Err(DataIntegrityError::UnknownStream { .. })
        ));
    }

    #[test]
    fn test_no_streams_rejected() {
        let result = Catalog::from_entries(vec![entry("a", &[], &[])]);
        assert_eq!(
            result.unwrap_err(),
            DataIntegrityError::NoEligibleStreams("a".to_string())
        );
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = Catalog::from_entries(vec![
            entry("a", &["Arts"], &[]),
            entry("a", &["Commerce"], &[]),
        ]);
        assert_eq!(
            result.unwrap_err(),
            DataIntegrityError::DuplicateCourseId("a".to_string())
        );
    }

    #[test]
    fn test_invalid_minimum_grade_rejected() {
        let mut bad = entry("a", &["Arts"], &[]);
        bad.minimum_grade = Some("A+".to_string());
        assert!(matches!(
            Catalog::from_entries(vec![bad]),
            Err(DataIntegrityError::InvalidMinimumGrade { .. })
        ));
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
courses:
  - id: law-001
    name: Law
    university: University of Colombo
    streams: [Arts, Commerce]
    interests: [leadership, problem-solving]
    minimum_grade: B
    aptitude_tests: [Law Aptitude]
"#;
        let catalog = Catalog::from_yaml(yaml).unwrap();
        assert_eq!(catalog.len(), 1);
        let law = catalog.get("law-001").unwrap();
        assert!(law.requires_aptitude_test());
        assert_eq!(law.minimum_grade, Some(Grade::B));
        assert_eq!(catalog.for_stream(Stream::Commerce).count(), 1);
        assert_eq!(catalog.for_stream(Stream::PhysicalScience).count(), 0);
    }

    #[test]
    fn test_from_yaml_integrity_error_is_typed() {
        let yaml = r#"
courses:
  - id: x
    name: X
    university: Y
    streams: [Arts]
    interests: [astrology]
"#;
        let err = Catalog::from_yaml(yaml).unwrap_err();
        assert!(err.downcast_ref::<DataIntegrityError>().is_some());
    }
}
