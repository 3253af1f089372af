use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::academic::{AcademicRecord, SubjectResult};
use super::interests::{InterestQuestion, InterestVector};
use super::stream::Stream;
use crate::scoring::error::InvalidInputError;

/// Student profile as stored on disk.
///
/// Example YAML:
/// ```yaml
/// name: Nimal
/// stream: Physical Science
/// subjects:
///   - { name: Combined Mathematics, grade: A }
///   - { name: Physics, grade: A }
///   - { name: Chemistry, grade: B }
/// interests:
///   technology: 5
///   mathematics: 4
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StudentProfile {
    #[serde(default)]
    pub name: Option<String>,

    /// Stream name as entered; normalized when converted to scoring inputs
    pub stream: String,

    #[serde(default)]
    pub subjects: Vec<SubjectResult>,

    /// Interest question id (or number) to rating 1-5
    #[serde(default)]
    pub interests: BTreeMap<String, i64>,
}

impl StudentProfile {
    /// Convert the stored profile into validated scoring inputs.
    pub fn to_inputs(&self) -> Result<(AcademicRecord, InterestVector), InvalidInputError> {
        let stream = Stream::parse(&self.stream)
            .ok_or_else(|| InvalidInputError::UnknownStream(self.stream.clone()))?;

        if self.subjects.is_empty() {
            return Err(InvalidInputError::EmptySubjects);
        }

        let answers = self
            .interests
            .iter()
            .map(|(id, rating)| {
                InterestQuestion::parse(id)
                    .map(|q| (q, *rating))
                    .ok_or_else(|| InvalidInputError::UnknownInterest(id.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let interests = InterestVector::new(answers)?;
        Ok((AcademicRecord::new(stream, self.subjects.clone()), interests))
    }
}

/// Get the default profile path (~/.config/course-rank/profile.yaml)
pub fn get_profile_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("profile.yaml"))
}

/// Load a student profile from a YAML file
pub fn load_profile(path: &Path) -> Result<StudentProfile> {
    if !path.exists() {
        anyhow::bail!(
            "Profile not found at {}. Run `course-rank init` to create one",
            path.display()
        );
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile at {}", path.display()))?;

    serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse profile: invalid YAML in {}", path.display()))
}

/// Save a student profile atomically, creating the parent directory if needed.
pub fn save_profile(path: &Path, profile: &StudentProfile) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory at {}", parent.display()))?;
        }
    }

    let yaml = serde_saphyr::to_string(profile).context("Failed to serialize profile")?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .context("Failed to write profile")?;
    file.commit().context("Failed to save profile")?;

    Ok(())
}
