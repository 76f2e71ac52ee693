//! Initializer settings with layered precedence
//!
//! Loads settings from the following sources (low to high):
//! 1. Built-in defaults
//! 2. Settings file (explicit path, else `<template>/.vibe-init.yaml` if present)
//! 3. Environment variables (VIBE_INIT_* prefix)

use crate::error::{Error, Result};
use crate::filters::{ExclusionSet, DEFAULT_EXCLUDE};
use crate::manifest::ManifestPatch;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Settings file looked up inside the template directory
pub const SETTINGS_FILE_NAME: &str = ".vibe-init.yaml";

/// Manifest patched with the project name
pub const DEFAULT_MANIFEST_FILE: &str = "pyproject.toml";

/// Name the template ships with in its manifest
pub const DEFAULT_PLACEHOLDER: &str = "fastapi-vibe-template";

/// Sentence written under the README heading
pub const DEFAULT_README_DESCRIPTION: &str = "This project was created from the FastAPI Vibe Template. Update this README with your project details.";

/// Resolved initializer settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitSettings {
    /// Exclusion patterns, defaults first
    pub exclude: Vec<String>,
    /// Manifest path relative to the project directory
    pub manifest_file: String,
    /// Project name the template's manifest carries
    pub placeholder: String,
    /// README sentence
    pub readme_description: String,
}

impl Default for InitSettings {
    fn default() -> Self {
        let mut exclude: Vec<String> = DEFAULT_EXCLUDE.iter().map(|p| p.to_string()).collect();
        exclude.push(SETTINGS_FILE_NAME.to_string());

        Self {
            exclude,
            manifest_file: DEFAULT_MANIFEST_FILE.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            readme_description: DEFAULT_README_DESCRIPTION.to_string(),
        }
    }
}

impl InitSettings {
    /// Compile the exclusion patterns
    pub fn exclusion_set(&self) -> Result<ExclusionSet> {
        ExclusionSet::new(self.exclude.iter().cloned())
    }

    /// Manifest patch described by these settings
    pub fn manifest_patch(&self) -> ManifestPatch {
        ManifestPatch::new(&self.manifest_file, &self.placeholder)
    }

    fn validate(&self) -> Result<()> {
        let manifest = Path::new(&self.manifest_file);
        let plain = !self.manifest_file.is_empty()
            && manifest
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !plain {
            return Err(Error::invalid_config(format!(
                "manifest file must be a relative path inside the project: {:?}",
                self.manifest_file
            )));
        }

        if self.placeholder.is_empty() {
            return Err(Error::invalid_config("manifest placeholder cannot be empty"));
        }

        Ok(())
    }
}

/// On-disk settings file shape
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct SettingsFile {
    #[serde(default)]
    extra_exclude: Vec<String>,
    #[serde(default)]
    manifest: ManifestSection,
    #[serde(default)]
    readme: ReadmeSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ManifestSection {
    file: Option<String>,
    placeholder: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ReadmeSection {
    description: Option<String>,
}

/// Settings loader
pub struct SettingsLoader {
    /// Template directory searched for the settings file
    template_dir: PathBuf,
    /// Explicit settings file, must exist when set
    settings_file: Option<PathBuf>,
}

impl SettingsLoader {
    /// Create a loader for a template directory
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
            settings_file: None,
        }
    }

    /// Use an explicit settings file instead of searching the template
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_file = Some(path.into());
        self
    }

    /// Load settings with layered precedence
    pub fn load(&self) -> Result<InitSettings> {
        let mut settings = InitSettings::default();

        if let Some(path) = self.settings_path()? {
            tracing::debug!("Loading settings from {}", path.display());
            let file = Self::load_yaml_file(&path)?;
            settings = Self::merge_file(settings, file);
        }

        settings = Self::apply_env_overrides(settings)?;
        settings.validate()?;

        Ok(settings)
    }

    fn settings_path(&self) -> Result<Option<PathBuf>> {
        if let Some(path) = &self.settings_file {
            if !path.is_file() {
                return Err(Error::ConfigNotFound { path: path.clone() });
            }
            return Ok(Some(path.clone()));
        }

        let default_path = self.template_dir.join(SETTINGS_FILE_NAME);
        Ok(default_path.is_file().then_some(default_path))
    }

    fn load_yaml_file(path: &Path) -> Result<SettingsFile> {
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(SettingsFile::default());
        }
        Ok(serde_yaml_ng::from_str(&content)?)
    }

    /// Merge a settings file over the current settings
    fn merge_file(mut base: InitSettings, file: SettingsFile) -> InitSettings {
        base.exclude.extend(file.extra_exclude);
        if let Some(manifest_file) = file.manifest.file {
            base.manifest_file = manifest_file;
        }
        if let Some(placeholder) = file.manifest.placeholder {
            base.placeholder = placeholder;
        }
        if let Some(description) = file.readme.description {
            base.readme_description = description;
        }
        base
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut settings: InitSettings) -> Result<InitSettings> {
        if let Ok(val) = env::var("VIBE_INIT_MANIFEST_FILE") {
            if val.trim().is_empty() {
                return Err(Error::invalid_config("VIBE_INIT_MANIFEST_FILE cannot be empty"));
            }
            settings.manifest_file = val;
        }

        if let Ok(val) = env::var("VIBE_INIT_PLACEHOLDER") {
            if val.is_empty() {
                return Err(Error::invalid_config("VIBE_INIT_PLACEHOLDER cannot be empty"));
            }
            settings.placeholder = val;
        }

        if let Ok(val) = env::var("VIBE_INIT_EXTRA_EXCLUDE") {
            let extra: Vec<String> = val
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect();
            if extra.is_empty() {
                return Err(Error::invalid_config(
                    "VIBE_INIT_EXTRA_EXCLUDE must list at least one pattern",
                ));
            }
            settings.exclude.extend(extra);
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    const ENV_VARS: &[&str] = &[
        "VIBE_INIT_MANIFEST_FILE",
        "VIBE_INIT_PLACEHOLDER",
        "VIBE_INIT_EXTRA_EXCLUDE",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_load_defaults() {
        clear_env();
        let temp = TempDir::new().unwrap();

        let settings = SettingsLoader::new(temp.path()).load().unwrap();

        assert_eq!(settings, InitSettings::default());
        assert_eq!(settings.manifest_file, "pyproject.toml");
        assert_eq!(settings.placeholder, "fastapi-vibe-template");
        assert!(settings.exclude.iter().any(|p| p == SETTINGS_FILE_NAME));
    }

    #[test]
    #[serial]
    fn test_load_from_template_file() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let content = r#"
extra-exclude: ["*.log", "node_modules"]
manifest:
  file: package.json
  placeholder: web-template
readme:
  description: "Generated."
"#;
        fs::write(temp.path().join(SETTINGS_FILE_NAME), content).unwrap();

        let settings = SettingsLoader::new(temp.path()).load().unwrap();

        assert_eq!(settings.manifest_file, "package.json");
        assert_eq!(settings.placeholder, "web-template");
        assert_eq!(settings.readme_description, "Generated.");
        assert!(settings.exclude.iter().any(|p| p == ".git"));
        assert!(settings.exclude.iter().any(|p| p == "*.log"));
        assert!(settings.exclude.iter().any(|p| p == "node_modules"));
    }

    #[test]
    #[serial]
    fn test_empty_settings_file() {
        clear_env();
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SETTINGS_FILE_NAME), "\n").unwrap();

        let settings = SettingsLoader::new(temp.path()).load().unwrap();
        assert_eq!(settings, InitSettings::default());
    }

    #[test]
    #[serial]
    fn test_unknown_key_rejected() {
        clear_env();
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SETTINGS_FILE_NAME), "exclude: [\"*.md\"]\n").unwrap();

        let result = SettingsLoader::new(temp.path()).load();
        assert!(matches!(result, Err(Error::YamlParse(_))));
    }

    #[test]
    #[serial]
    fn test_malformed_yaml_rejected() {
        clear_env();
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(SETTINGS_FILE_NAME),
            "extra-exclude: [unterminated\n",
        )
        .unwrap();

        let result = SettingsLoader::new(temp.path()).load();
        assert!(matches!(result, Err(Error::YamlParse(_))));
    }

    #[test]
    #[serial]
    fn test_explicit_file_must_exist() {
        clear_env();
        let temp = TempDir::new().unwrap();

        let result = SettingsLoader::new(temp.path())
            .with_file(temp.path().join("missing.yaml"))
            .load();
        assert!(matches!(result, Err(Error::ConfigNotFound { .. })));
    }

    #[test]
    #[serial]
    fn test_explicit_file_overrides_template_file() {
        clear_env();
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(SETTINGS_FILE_NAME),
            "manifest:\n  placeholder: from-template\n",
        )
        .unwrap();
        let explicit = temp.path().join("custom.yaml");
        fs::write(&explicit, "manifest:\n  placeholder: from-explicit\n").unwrap();

        let settings = SettingsLoader::new(temp.path())
            .with_file(&explicit)
            .load()
            .unwrap();
        assert_eq!(settings.placeholder, "from-explicit");
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(SETTINGS_FILE_NAME),
            "manifest:\n  placeholder: from-file\n",
        )
        .unwrap();

        env::set_var("VIBE_INIT_PLACEHOLDER", "from-env");
        env::set_var("VIBE_INIT_MANIFEST_FILE", "setup.cfg");
        env::set_var("VIBE_INIT_EXTRA_EXCLUDE", "*.log, dist ,");

        let settings = SettingsLoader::new(temp.path()).load();
        clear_env();
        let settings = settings.unwrap();

        assert_eq!(settings.placeholder, "from-env");
        assert_eq!(settings.manifest_file, "setup.cfg");
        assert!(settings.exclude.iter().any(|p| p == "*.log"));
        assert!(settings.exclude.iter().any(|p| p == "dist"));
    }

    #[test]
    #[serial]
    fn test_env_empty_values_rejected() {
        clear_env();
        let temp = TempDir::new().unwrap();

        env::set_var("VIBE_INIT_EXTRA_EXCLUDE", " , ");
        let result = SettingsLoader::new(temp.path()).load();
        clear_env();

        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    #[serial]
    fn test_manifest_outside_project_rejected() {
        clear_env();
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(SETTINGS_FILE_NAME),
            "manifest:\n  file: ../pyproject.toml\n",
        )
        .unwrap();

        let result = SettingsLoader::new(temp.path()).load();
        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn test_exclusion_set_from_defaults() {
        let set = InitSettings::default().exclusion_set().unwrap();
        assert!(set.is_excluded(std::ffi::OsStr::new(SETTINGS_FILE_NAME), false));
        assert!(set.is_excluded(std::ffi::OsStr::new("TODO.md"), false));
    }
}
