use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ast::Literal;
use crate::catalog::{Platform, Version};
use crate::context::Environment;

/// Engine settings: which OS the stylesheet targets and the ambient environment values.
///
/// ```json
/// { "platform": "macOS", "runtimeVersion": "14.2", "environment": { "colorScheme": "dark" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    pub platform: Platform,
    pub runtime_version: Version,
    pub environment: BTreeMap<String, Literal>,
}

impl Default for Config {
    fn default() -> Self {
        let environment = Environment::default();
        Self {
            platform: environment.platform,
            runtime_version: environment.runtime_version,
            environment: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read config: {}", path.display()))?;
        let config: Config = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse config JSON: {}", path.display()))?;
        log::debug!(
            "Loaded config from {}: {} {}",
            path.display(),
            config.platform,
            config.runtime_version
        );
        Ok(config)
    }

    pub fn environment(&self) -> Environment {
        self.environment
            .iter()
            .fold(
                Environment::new(self.platform, self.runtime_version),
                |env, (key, value)| env.with_value(key.clone(), value.clone()),
            )
    }
}
