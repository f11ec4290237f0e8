//! Form builder configuration using Figment
//!
//! Sources are merged in precedence order, later ones overriding earlier:
//! 1. Built-in defaults
//! 2. An optional TOML, YAML or JSON file
//! 3. `FORMBIND_`-prefixed environment variables
//!    (e.g. `FORMBIND_DISPLAY_ELEMENT=span`)

use std::path::Path;

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FormError, Result};

/// Markers and tokens used while rendering controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormBuilderConfig {
    /// Attribute text marking a checked radio or checkbox.
    pub checked_marker: String,
    /// Attribute text marking a selected option.
    pub selected_marker: String,
    /// Values that count as "on" for boolean checkboxes, compared
    /// case-insensitively.
    pub truthy_tokens: Vec<String>,
    /// Element wrapping each display entry.
    pub display_element: String,
}

impl Default for FormBuilderConfig {
    fn default() -> Self {
        Self {
            checked_marker: " checked=\"checked\"".to_string(),
            selected_marker: " selected=\"selected\"".to_string(),
            truthy_tokens: ["1", "t", "true", "y", "yes", "on"]
                .into_iter()
                .map(String::from)
                .collect(),
            display_element: "div".to_string(),
        }
    }
}

impl FormBuilderConfig {
    pub const ENV_PREFIX: &'static str = "FORMBIND_";

    /// Build the figment for the given optional file.
    pub fn figment(file: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = file {
            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase);
            figment = match extension.as_deref() {
                Some("toml") => figment.merge(Toml::file(path)),
                Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                _ => {
                    return Err(FormError::UnsupportedFormat {
                        path: path.to_path_buf(),
                    })
                }
            };
        }

        Ok(figment.merge(
            Env::prefixed(Self::ENV_PREFIX).map(|key| key.as_str().to_lowercase().into()),
        ))
    }

    /// Load configuration from defaults, an optional file and the
    /// environment.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let config: Self = Self::figment(file)?.extract()?;
        debug!(
            file = ?file,
            display_element = %config.display_element,
            truthy_tokens = config.truthy_tokens.len(),
            "loaded form builder configuration"
        );
        Ok(config)
    }

    /// Whether a submitted token turns a boolean control on.
    pub fn is_truthy(&self, token: &str) -> bool {
        let token = token.trim();
        self.truthy_tokens
            .iter()
            .any(|t| t.eq_ignore_ascii_case(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_render_xhtml_markers() {
        let config = FormBuilderConfig::default();
        assert_eq!(config.checked_marker, " checked=\"checked\"");
        assert_eq!(config.selected_marker, " selected=\"selected\"");
        assert_eq!(config.display_element, "div");
    }

    #[test]
    fn truthy_tokens_are_case_insensitive() {
        let config = FormBuilderConfig::default();
        for token in ["true", "TRUE", "On", "1", "y", " yes "] {
            assert!(config.is_truthy(token), "{token} should be truthy");
        }
        for token in ["false", "0", "off", "", "maybe"] {
            assert!(!config.is_truthy(token), "{token} should not be truthy");
        }
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("formbind.toml");
        std::fs::write(&path, "display_element = \"span\"\ntruthy_tokens = [\"oui\"]\n").unwrap();

        let config = FormBuilderConfig::load(Some(&path)).unwrap();
        assert_eq!(config.display_element, "span");
        assert!(config.is_truthy("OUI"));
        assert!(!config.is_truthy("true"));
        assert_eq!(config.checked_marker, " checked=\"checked\"");
    }

    #[test]
    fn yaml_file_is_read() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("formbind.yaml");
        std::fs::write(&path, "checked_marker: \" checked\"\n").unwrap();

        let config = FormBuilderConfig::load(Some(&path)).unwrap();
        assert_eq!(config.checked_marker, " checked");
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("formbind.toml");
        std::fs::write(&path, "display_element = \"unclosed").unwrap();

        let err = FormBuilderConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, FormError::Config { .. }));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = FormBuilderConfig::load(Some(Path::new("formbind.ini"))).unwrap_err();
        assert!(matches!(err, FormError::UnsupportedFormat { .. }));
    }
}
