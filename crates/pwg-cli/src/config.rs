//! # Configuration
//!
//! Optional YAML file passed with `--config`. Every field has a default, so
//! an empty file and a missing flag behave the same.
//!
//! ```yaml
//! variant: extended          # basic | extended
//! detail_rules: details.yaml # relative to this file
//! progress_bar_width: 20
//! default_country: UK
//! default_religion: Islam
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use pwg_catalog::DetailResolver;
use pwg_state::Variant;

/// Settings for the terminal guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuideConfig {
    /// Which guide to run.
    pub variant: Variant,
    /// YAML detail rules replacing the built-in ones.
    pub detail_rules: Option<PathBuf>,
    /// Width of the rendered progress bar, in cells.
    pub progress_bar_width: usize,
    /// Country preselected when a session starts.
    pub default_country: Option<String>,
    /// Religion preselected when a session starts.
    pub default_religion: Option<String>,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Extended,
            detail_rules: None,
            progress_bar_width: 20,
            default_country: None,
            default_religion: None,
        }
    }
}

impl GuideConfig {
    /// Load the config from `path`, or defaults when no path is given.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Load and parse a YAML config file.
    ///
    /// A relative `detail_rules` path is resolved against the directory
    /// containing the config file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config: GuideConfig = if raw.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        };

        if let Some(rules) = config.detail_rules.as_mut() {
            if rules.is_relative() {
                if let Some(dir) = path.parent() {
                    *rules = dir.join(&*rules);
                }
            }
        }

        tracing::debug!(path = %path.display(), variant = %config.variant, "loaded config");
        Ok(config)
    }

    /// The detail resolver selected by this config.
    pub fn detail_resolver(&self) -> Result<DetailResolver> {
        let Some(path) = &self.detail_rules else {
            return Ok(DetailResolver::builtin().clone());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading detail rules {}", path.display()))?;
        let resolver = DetailResolver::from_yaml(&raw)
            .with_context(|| format!("loading detail rules {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            rules = resolver.rule_count(),
            overrides = resolver.override_count(),
            "using custom detail rules"
        );
        Ok(resolver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_no_path_gives_defaults() {
        let config = GuideConfig::resolve(None).unwrap();
        assert_eq!(config, GuideConfig::default());
        assert_eq!(config.variant, Variant::Extended);
        assert_eq!(config.progress_bar_width, 20);
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "guide.yaml", "");
        assert_eq!(GuideConfig::load(&path).unwrap(), GuideConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "guide.yaml", "variant: basic\ndefault_country: UK\n");
        let config = GuideConfig::load(&path).unwrap();
        assert_eq!(config.variant, Variant::Basic);
        assert_eq!(config.default_country.as_deref(), Some("UK"));
        assert_eq!(config.progress_bar_width, 20);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "guide.yaml", "colour: blue\n");
        assert!(GuideConfig::load(&path).is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GuideConfig::load(&dir.path().join("absent.yaml")).is_err());
    }

    #[test]
    fn test_relative_rules_path_resolved_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "details.yaml",
            "rules:\n  - keywords: [garden]\n    detail: Garden\nfallback: Other\n",
        );
        let path = write_file(dir.path(), "guide.yaml", "detail_rules: details.yaml\n");
        let config = GuideConfig::load(&path).unwrap();
        assert_eq!(config.detail_rules, Some(dir.path().join("details.yaml")));

        let resolver = config.detail_resolver().unwrap();
        assert_eq!(resolver.rule_count(), 1);
        assert_eq!(resolver.override_count(), 0);
    }

    #[test]
    fn test_default_resolver_is_builtin() {
        let resolver = GuideConfig::default().detail_resolver().unwrap();
        assert_eq!(resolver.rule_count(), DetailResolver::builtin().rule_count());
    }
}
