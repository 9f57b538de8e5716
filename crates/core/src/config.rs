//! User configuration.
//!
//! Loaded from `~/.groovyscope/config.json` (or an explicit path) and then
//! overridden by `GROOVYSCOPE_*` environment variables. Every field has a
//! default, so an absent file is not an error.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CLASSPATH_ENV: &str = "GROOVYSCOPE_CLASSPATH";
pub const GROOVY_LEVEL_ENV: &str = "GROOVYSCOPE_GROOVY_LEVEL";

/// Groovy language level whose runtime library layout the catalog mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GroovyLevel {
    #[serde(rename = "1.8")]
    V1_8,
    #[serde(rename = "2.0")]
    V2_0,
    #[serde(rename = "2.4")]
    V2_4,
    #[serde(rename = "2.5")]
    V2_5,
    #[serde(rename = "3.0")]
    V3_0,
    #[serde(rename = "4.0")]
    V4_0,
}

impl GroovyLevel {
    /// Groovy 2.0 split `DefaultGroovyMethods` into several classes.
    pub fn has_split_dgm(self) -> bool {
        self >= GroovyLevel::V2_0
    }
}

impl Default for GroovyLevel {
    fn default() -> Self {
        GroovyLevel::V2_5
    }
}

impl FromStr for GroovyLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1.8" => Ok(GroovyLevel::V1_8),
            "2.0" => Ok(GroovyLevel::V2_0),
            "2.4" => Ok(GroovyLevel::V2_4),
            "2.5" => Ok(GroovyLevel::V2_5),
            "3.0" => Ok(GroovyLevel::V3_0),
            "4.0" => Ok(GroovyLevel::V4_0),
            other => Err(CoreError::Config(format!("unsupported Groovy level '{other}'"))),
        }
    }
}

impl fmt::Display for GroovyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GroovyLevel::V1_8 => "1.8",
            GroovyLevel::V2_0 => "2.0",
            GroovyLevel::V2_4 => "2.4",
            GroovyLevel::V2_5 => "2.5",
            GroovyLevel::V3_0 => "3.0",
            GroovyLevel::V4_0 => "4.0",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroovyscopeConfig {
    pub groovy_level: GroovyLevel,
    /// Directories and jars scanned for extension modules
    pub classpath: Vec<PathBuf>,
    /// Nested inference requests deeper than this resolve to unknown
    pub max_inference_depth: usize,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Class name given to top-level script code
    pub script_class: String,
}

impl Default for GroovyscopeConfig {
    fn default() -> Self {
        Self {
            groovy_level: GroovyLevel::default(),
            classpath: Vec::new(),
            max_inference_depth: 64,
            log_filter: "info".to_string(),
            script_class: "Script".to_string(),
        }
    }
}

impl GroovyscopeConfig {
    /// `~/.groovyscope`, or `./.groovyscope` when no home directory is known.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".groovyscope")
    }

    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.json")
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist; the default one may be missing.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default = Self::default_path();
                if default.exists() {
                    Self::from_file(&default)?
                } else {
                    Self::default()
                }
            }
        };
        config.with_env_overrides()
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply `GROOVYSCOPE_CLASSPATH` (platform path list, appended) and
    /// `GROOVYSCOPE_GROOVY_LEVEL`.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(paths) = std::env::var_os(CLASSPATH_ENV) {
            self.classpath.extend(std::env::split_paths(&paths));
        }
        if let Ok(level) = std::env::var(GROOVY_LEVEL_ENV) {
            self.groovy_level = level.parse()?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "groovy_level": "1.8", "classpath": ["/opt/ext"] }}"#).unwrap();

        let config = GroovyscopeConfig::from_file(file.path()).unwrap();
        assert_eq!(config.groovy_level, GroovyLevel::V1_8);
        assert_eq!(config.classpath, vec![PathBuf::from("/opt/ext")]);
        assert_eq!(config.max_inference_depth, 64);
        assert_eq!(config.script_class, "Script");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            GroovyscopeConfig::load(Some(&missing)),
            Err(CoreError::Io(_))
        ));
    }

    #[test]
    fn test_level_parsing_and_ordering() {
        assert_eq!("2.0".parse::<GroovyLevel>().unwrap(), GroovyLevel::V2_0);
        assert!("9.9".parse::<GroovyLevel>().is_err());
        assert!(!GroovyLevel::V1_8.has_split_dgm());
        assert!(GroovyLevel::V2_0.has_split_dgm());
        assert_eq!(GroovyLevel::V3_0.to_string(), "3.0");
    }
}
