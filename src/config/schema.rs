use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::ScoringConfig;

#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Course catalog YAML; the built-in catalog is used when absent
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    /// Student profile YAML; defaults to ~/.config/course-rank/profile.yaml
    #[serde(default)]
    pub profile: Option<PathBuf>,

    /// Number of courses shown by `list`; all when absent
    #[serde(default)]
    pub top: Option<usize>,

    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
}
