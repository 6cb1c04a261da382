// Session configuration loaded from YAML

use eyre::{Context, Result, eyre};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "problemlist";
const CONFIG_FILE: &str = "config.yaml";

/// Presentation settings for the terminal session
///
/// Every key is optional in the file; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Heading printed above the list
    pub title: String,
    /// Shown instead of rows when nothing is displayed
    pub placeholder: String,
    /// Prompt while adding problems
    pub input_prompt: String,
    /// Prompt while searching
    pub search_prompt: String,
    pub color: bool,
    /// Default tracing filter when RUST_LOG is not set
    pub log_level: String,
    /// Open the session in search mode instead of input mode
    pub start_in_search: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "List of problems".to_string(),
            placeholder: "ENTER PROBLEMS".to_string(),
            input_prompt: "Write all problems here".to_string(),
            search_prompt: "Search problems".to_string(),
            color: true,
            log_level: "warn".to_string(),
            start_in_search: false,
        }
    }
}

impl Config {
    /// Load configuration from the file picked by [`resolve_path`](Self::resolve_path)
    ///
    /// An explicit `path` must exist. Without one, defaults are used when the
    /// per-user file is absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match Self::resolve_path(path) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// File that [`load`](Self::load) reads: the explicit path, else the
    /// per-user file when it exists
    pub fn resolve_path(path: Option<&Path>) -> Option<PathBuf> {
        match path {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|path| path.exists()),
        }
    }

    /// Read configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(eyre!("Config file not found: {}", path.display()));
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = Self::from_yaml(&content).with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Parse configuration from YAML text; an empty document gives defaults
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config = serde_yaml::from_str(content).context("Failed to parse YAML")?;
        Ok(config)
    }

    /// `<config dir>/problemlist/config.yaml`, when the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.title, "List of problems");
        assert_eq!(config.placeholder, "ENTER PROBLEMS");
        assert!(config.color);
        assert!(!config.start_in_search);
    }

    #[test]
    fn test_empty_yaml_gives_defaults() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
        assert_eq!(Config::from_yaml("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_yaml_overrides() {
        let config = Config::from_yaml("title: Bugs\ncolor: false\n").unwrap();
        assert_eq!(config.title, "Bugs");
        assert!(!config.color);
        assert_eq!(config.placeholder, "ENTER PROBLEMS");
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_yaml("colour: false\n").is_err());
    }

    #[test]
    fn test_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "search_prompt: Find\nstart_in_search: true\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.search_prompt, "Find");
        assert!(config.start_in_search);
    }

    #[test]
    fn test_resolve_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.yaml");

        assert_eq!(Config::resolve_path(Some(path.as_path())), Some(path.clone()));
    }

    #[test]
    fn test_resolve_default_path_only_when_present() {
        let resolved = Config::resolve_path(None);
        match Config::default_path() {
            Some(path) if path.exists() => assert_eq!(resolved, Some(path)),
            _ => assert!(resolved.is_none()),
        }
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.yaml");

        let err = Config::load(Some(path.as_path())).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.yaml");
        fs::write(&path, "title: [unclosed\n").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("bad.yaml"));
    }
}
