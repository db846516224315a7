//! Generation configuration loaded from YAML files
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! same configuration as `GeneratorConfig::default()`.

use crate::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Options controlling client generation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Package name of the generated client (convention: snake_case)
    pub package_name: String,
    /// Package version of the generated client
    pub package_version: String,
    /// Order parameters so that required ones come first
    pub sort_params_by_required: bool,
    /// Skip the generated test package
    pub exclude_tests: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package_name: "swagger_client".to_string(),
            package_version: "1.0.0".to_string(),
            sort_params_by_required: true,
            exclude_tests: false,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            GeneratorError::Config(msg) => {
                GeneratorError::Config(format!("{} (in {:?})", msg, path))
            }
            other => other,
        })
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content)
            .map_err(|e| GeneratorError::Config(format!("Failed to parse config YAML: {}", e)))
    }

    /// Override values given explicitly on the command line
    pub fn with_overrides(
        mut self,
        package_name: Option<&str>,
        package_version: Option<&str>,
    ) -> Self {
        if let Some(name) = package_name {
            self.package_name = name.to_string();
        }
        if let Some(version) = package_version {
            self.package_version = version.to_string();
        }
        self
    }
}
