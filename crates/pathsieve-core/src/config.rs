//! Configuration management for pathsieve.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for pathsieve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where to scan.
    pub scan: ScanConfig,

    /// Which scanned files to keep.
    pub exclusions: ExclusionSettings,
}

/// Directories walked by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Base directory; candidate paths are relative to it.
    pub base_dir: PathBuf,

    /// Source directories, relative to `base_dir`.
    pub source_dirs: Vec<PathBuf>,

    /// Test directories, relative to `base_dir`.
    pub test_dirs: Vec<PathBuf>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            source_dirs: vec![PathBuf::from("src")],
            test_dirs: vec![PathBuf::from("tests")],
        }
    }
}

/// Raw wildcard pattern groups, as written in configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionSettings {
    pub source_inclusions: Vec<String>,
    pub source_exclusions: Vec<String>,
    pub test_inclusions: Vec<String>,
    pub test_exclusions: Vec<String>,

    /// Project-wide source exclusions, appended to `source_exclusions`.
    pub global_exclusions: Vec<String>,

    /// Project-wide test exclusions, appended to `test_exclusions`.
    pub global_test_exclusions: Vec<String>,
}

impl ExclusionSettings {
    pub fn source_inclusions(&self) -> &[String] {
        &self.source_inclusions
    }

    pub fn test_inclusions(&self) -> &[String] {
        &self.test_inclusions
    }

    /// Module source exclusions followed by the global ones.
    pub fn source_exclusions(&self) -> Vec<String> {
        merge(&self.source_exclusions, &self.global_exclusions)
    }

    /// Module test exclusions followed by the global ones.
    pub fn test_exclusions(&self) -> Vec<String> {
        merge(&self.test_exclusions, &self.global_test_exclusions)
    }
}

fn merge(module: &[String], global: &[String]) -> Vec<String> {
    module.iter().chain(global).cloned().collect()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;

        // Expand tilde (~) in paths
        config.expand_tilde_in_paths();

        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = self.to_toml()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Render the configuration as pretty TOML.
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Serialization(e.to_string()))
    }

    fn expand_tilde_in_paths(&mut self) {
        let expanded = shellexpand::tilde(&self.scan.base_dir.to_string_lossy()).into_owned();
        self.scan.base_dir = PathBuf::from(expanded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_scan_src_and_tests() {
        let config = Config::default();

        assert_eq!(config.scan.base_dir, PathBuf::from("."));
        assert_eq!(config.scan.source_dirs, vec![PathBuf::from("src")]);
        assert_eq!(config.scan.test_dirs, vec![PathBuf::from("tests")]);
        assert!(config.exclusions.source_inclusions.is_empty());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [exclusions]
            source_exclusions = ["**/generated/**"]
            "#,
        )
        .unwrap();

        assert_eq!(config.scan, ScanConfig::default());
        assert_eq!(
            config.exclusions.source_exclusions,
            vec!["**/generated/**".to_string()]
        );
    }

    #[test]
    fn test_global_exclusions_are_appended() {
        let settings = ExclusionSettings {
            source_exclusions: vec!["a/**".to_string()],
            global_exclusions: vec!["b/**".to_string()],
            test_exclusions: vec![],
            global_test_exclusions: vec!["c/**".to_string()],
            ..Default::default()
        };

        assert_eq!(settings.source_exclusions(), vec!["a/**", "b/**"]);
        assert_eq!(settings.test_exclusions(), vec!["c/**"]);
    }

    #[test]
    fn test_toml_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pathsieve.toml");

        let mut config = Config::default();
        config.exclusions.test_inclusions = vec!["**/*Test.java".to_string()];
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("missing.toml")).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pathsieve.toml");
        std::fs::write(&path, "[exclusions\nsource_inclusions = 3").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_tilde_in_base_dir_is_expanded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pathsieve.toml");
        std::fs::write(&path, "[scan]\nbase_dir = \"~/project\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(!config.scan.base_dir.to_string_lossy().starts_with('~'));
        assert!(config.scan.base_dir.ends_with("project"));
    }
}
