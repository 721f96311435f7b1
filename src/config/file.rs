//! Configuration file support for persistent settings.
//!
//! This module provides support for loading configuration from a TOML file
//! located at `~/.config/dirlist/config.toml` (or the platform-specific
//! equivalent). Configuration file values serve as defaults that can be
//! overridden by CLI arguments.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! # Paths listed when none are given on the command line
//! dirs = ["~/Downloads"]
//!
//! [filtering]
//! min_size = "10K"
//! max_size = "2G"
//! max_days = 30
//!
//! [scanning]
//! recursive = true
//! all = false
//! max_depth = 4
//! skip = [".git", "node_modules"]
//!
//! [output]
//! json = false
//! quiet = false
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so we can detect which values are present in the
/// config file and apply layered configuration (CLI > config file > defaults).
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Default paths to list
    pub dirs: Option<Vec<PathBuf>>,

    /// Filtering options
    #[serde(default)]
    pub filtering: FileFilterConfig,

    /// Scanning options
    #[serde(default)]
    pub scanning: FileScanConfig,

    /// Output options
    #[serde(default)]
    pub output: FileOutputConfig,
}

/// Filtering options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileFilterConfig {
    /// Minimum entry size (e.g., `"10K"`)
    pub min_size: Option<String>,

    /// Maximum entry size (e.g., `"2G"`)
    pub max_size: Option<String>,

    /// Maximum age in days
    pub max_days: Option<u32>,
}

/// Scanning options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileScanConfig {
    /// Whether to descend into subdirectories
    pub recursive: Option<bool>,

    /// Whether to include hidden entries
    pub all: Option<bool>,

    /// Maximum directory depth for recursive listings
    pub max_depth: Option<usize>,

    /// Entry names to skip entirely
    pub skip: Option<Vec<String>>,
}

/// Output options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileOutputConfig {
    /// Whether to emit JSON lines
    pub json: Option<bool>,

    /// Whether to suppress per-path diagnostics
    pub quiet: Option<bool>,
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// The configuration file is located at `<config_dir>/dirlist/config.toml`,
    /// where `<config_dir>` is the platform-specific configuration directory
    /// (e.g., `~/.config` on Linux, `%APPDATA%` on Windows).
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dirlist").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// If the config file doesn't exist, returns a default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// contains invalid TOML or unknown keys.
    pub fn load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file path.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_file_config() {
        let config = FileConfig::default();

        assert!(config.dirs.is_none());
        assert!(config.filtering.min_size.is_none());
        assert!(config.filtering.max_size.is_none());
        assert!(config.filtering.max_days.is_none());
        assert!(config.scanning.recursive.is_none());
        assert!(config.scanning.all.is_none());
        assert!(config.scanning.max_depth.is_none());
        assert!(config.scanning.skip.is_none());
        assert!(config.output.json.is_none());
        assert!(config.output.quiet.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
dirs = ["~/Downloads", "/var/log"]

[filtering]
min_size = "10K"
max_size = "2G"
max_days = 30

[scanning]
recursive = true
all = true
max_depth = 4
skip = [".git", "node_modules"]

[output]
json = true
quiet = false
"#;

        let config: FileConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(
            config.dirs,
            Some(vec![PathBuf::from("~/Downloads"), PathBuf::from("/var/log")])
        );
        assert_eq!(config.filtering.min_size, Some("10K".to_string()));
        assert_eq!(config.filtering.max_size, Some("2G".to_string()));
        assert_eq!(config.filtering.max_days, Some(30));
        assert_eq!(config.scanning.recursive, Some(true));
        assert_eq!(config.scanning.all, Some(true));
        assert_eq!(config.scanning.max_depth, Some(4));
        assert_eq!(
            config.scanning.skip,
            Some(vec![".git".to_string(), "node_modules".to_string()])
        );
        assert_eq!(config.output.json, Some(true));
        assert_eq!(config.output.quiet, Some(false));
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
[filtering]
min_size = "1M"
"#;

        let config: FileConfig = toml::from_str(toml_content).unwrap();

        assert!(config.dirs.is_none());
        assert_eq!(config.filtering.min_size, Some("1M".to_string()));
        assert!(config.filtering.max_days.is_none());
        assert!(config.scanning.recursive.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config: FileConfig = toml::from_str("").unwrap();

        assert!(config.dirs.is_none());
        assert!(config.filtering.min_size.is_none());
    }

    #[test]
    fn test_malformed_config_errors() {
        let toml_content = r#"
[filtering]
max_days = "not_a_number"
"#;
        assert!(toml::from_str::<FileConfig>(toml_content).is_err());
    }

    #[test]
    fn test_unknown_key_errors() {
        let toml_content = r"
[scanning]
recursve = true
";
        assert!(toml::from_str::<FileConfig>(toml_content).is_err());
    }

    #[test]
    fn test_config_path_returns_expected_suffix() {
        if let Some(p) = FileConfig::config_path() {
            assert!(p.ends_with(Path::new("dirlist").join("config.toml")));
        }
    }

    #[test]
    fn test_load_from_missing_file_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = FileConfig::load_from(&tmp.path().join("absent.toml")).unwrap();

        assert!(config.dirs.is_none());
        assert!(config.scanning.recursive.is_none());
    }

    #[test]
    fn test_load_from_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[scanning]\nrecursive = true\n").unwrap();

        let config = FileConfig::load_from(&path).unwrap();
        assert_eq!(config.scanning.recursive, Some(true));
    }

    #[test]
    fn test_load_from_reports_path_on_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[scanning\n").unwrap();

        let err = FileConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn test_expand_tilde_with_home() {
        let expanded = expand_tilde(&PathBuf::from("~/Downloads"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("Downloads"));
        }
    }

    #[test]
    fn test_expand_tilde_bare() {
        let expanded = expand_tilde(&PathBuf::from("~"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home);
        }
    }

    #[test]
    fn test_expand_tilde_no_effect_on_non_tilde() {
        let relative = PathBuf::from("some/relative/path");
        assert_eq!(expand_tilde(&relative), relative);

        let absolute = PathBuf::from("/usr/local/bin");
        assert_eq!(expand_tilde(&absolute), absolute);

        let tilde_inside = PathBuf::from("a/~/b");
        assert_eq!(expand_tilde(&tilde_inside), tilde_inside);
    }
}
