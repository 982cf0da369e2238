//! Builder configuration
//!
//! Settings are read from a TOML file. Every key is optional; missing keys
//! take the defaults below.
//!
//! ```toml
//! api_base_url = "https://builder.example.com"
//! api_token = "..."
//! export_cost = 200
//! default_framework = "tailwind"
//! history_limit = 100
//! request_timeout_secs = 30
//! projects_dir = "projects"
//! ```

use crate::history::DEFAULT_HISTORY_LIMIT;
use pagesmith_core::{BuilderError, BuilderResult, Framework, Validatable};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Credits charged for one export
pub const DEFAULT_EXPORT_COST: u64 = 200;

/// Default API location
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Configuration for a builder session and its collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Base URL of the project, export and credits API
    pub api_base_url: String,

    /// Bearer token sent with API requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Credits one export costs
    pub export_cost: u64,

    /// Framework used when an export does not name one
    pub default_framework: Framework,

    /// Maximum undo depth, `0` for unbounded
    pub history_limit: usize,

    /// Timeout for each API request
    pub request_timeout_secs: u64,

    /// Directory holding local project files
    pub projects_dir: PathBuf,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_token: None,
            export_cost: DEFAULT_EXPORT_COST,
            default_framework: Framework::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            request_timeout_secs: 30,
            projects_dir: PathBuf::from("projects"),
        }
    }
}

impl BuilderConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML string
    pub fn from_toml_str(s: &str) -> BuilderResult<Self> {
        let config: Self =
            toml::from_str(s).map_err(|e| BuilderError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string
    pub fn to_toml_string(&self) -> BuilderResult<String> {
        toml::to_string_pretty(self).map_err(|e| BuilderError::InvalidConfig(e.to_string()))
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> BuilderResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| BuilderError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Load from a TOML file, or fall back to defaults when it does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> BuilderResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> BuilderResult<()> {
        let path = path.as_ref();
        let text = self.to_toml_string()?;
        std::fs::write(path, text).map_err(|e| BuilderError::FileWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_export_cost(mut self, cost: u64) -> Self {
        self.export_cost = cost;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn with_projects_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.projects_dir = dir.into();
        self
    }

    /// Request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Validatable for BuilderConfig {
    fn validate(&self) -> BuilderResult<()> {
        let errors = self.validation_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(BuilderError::InvalidConfig(errors.join("; ")))
        }
    }

    fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            errors.push(format!(
                "api_base_url must start with http:// or https://, got '{}'",
                self.api_base_url
            ));
        }
        if self.history_limit == 1 {
            errors.push("history_limit must be 0 (unbounded) or at least 2".to_string());
        }
        if self.request_timeout_secs == 0 {
            errors.push("request_timeout_secs must be positive".to_string());
        }

        errors
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = BuilderConfig::default();
        assert_eq!(config.export_cost, 200);
        assert_eq!(config.default_framework, Framework::Tailwind);
        assert_eq!(config.history_limit, 100);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.is_valid());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = BuilderConfig::from_toml_str(
            r#"
            api_base_url = "https://builder.example.com/"
            default_framework = "bootstrap"
            "#,
        )
        .unwrap();

        assert_eq!(config.default_framework, Framework::Bootstrap);
        assert_eq!(config.export_cost, 200);
        assert_eq!(config.api_base_url, "https://builder.example.com/");
    }

    #[test]
    fn test_invalid_values() {
        let err = BuilderConfig::from_toml_str("api_base_url = \"ftp://x\"\nhistory_limit = 1")
            .unwrap_err();
        assert!(matches!(err, BuilderError::InvalidConfig(_)));
        assert!(err.to_string().contains("api_base_url"));
        assert!(err.to_string().contains("history_limit"));

        assert!(BuilderConfig::from_toml_str("export_cost = \"lots\"").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pagesmith.toml");

        let config = BuilderConfig::new()
            .with_api_token("secret")
            .with_export_cost(150)
            .with_history_limit(0);
        config.save(&path).unwrap();

        assert_eq!(BuilderConfig::load(&path).unwrap(), config);
        assert_eq!(
            BuilderConfig::load_or_default(dir.path().join("missing.toml")).unwrap(),
            BuilderConfig::default()
        );
    }
}
