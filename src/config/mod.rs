mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/course-rank/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("course-rank"))
}

/// Get the default config file path (~/.config/course-rank/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   and falls back to defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            read_config(&path)
        }
        None => {
            let default_path = get_config_path()?;
            if default_path.exists() {
                read_config(&default_path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
catalog: /srv/catalog.yaml
profile: ./me.yaml
top: 5
scoring:
  academic_weight: 0.7
  interest_weight: 0.3
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.catalog, Some(PathBuf::from("/srv/catalog.yaml")));
        assert_eq!(config.profile, Some(PathBuf::from("./me.yaml")));
        assert_eq!(config.top, Some(5));
        assert_eq!(config.scoring.unwrap().academic_weight, Some(0.7));
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_explicit_missing_path_errors() {
        let path = env::temp_dir().join("course_rank_test_missing_config.yaml");
        let _ = fs::remove_file(&path);
        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_config_from_file() {
        let path = env::temp_dir().join("course_rank_test_config.yaml");
        fs::write(&path, "top: 3\n").unwrap();
        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.top, Some(3));
        assert!(config.scoring.is_none());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_yaml_errors() {
        let path = env::temp_dir().join("course_rank_test_bad_config.yaml");
        fs::write(&path, "top: [not a number\n").unwrap();
        let err = load_config(Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
        let _ = fs::remove_file(&path);
    }
}
