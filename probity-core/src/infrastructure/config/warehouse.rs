// probity-core/src/infrastructure/config/warehouse.rs

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{info, instrument};
use validator::Validate;

use crate::infrastructure::error::InfrastructureError;

pub const ENV_PREFIX: &str = "PROBITY_";
pub const DEFAULT_ENGINE: &str = "duckdb";
pub const DEFAULT_SCHEMA: &str = "MY_SCHEMA";

/// Everything the connection provider needs, resolved once at startup.
///
/// A present setting must be non-empty; an absent one is left for the driver
/// to complain about.
#[derive(Deserialize, Validate, Clone, PartialEq)]
pub struct WarehouseConfig {
    #[serde(rename = "type", default = "default_engine")]
    #[validate(length(min = 1, message = "engine cannot be empty"))]
    pub engine: String,
    #[validate(length(min = 1))]
    pub user: Option<String>,
    #[validate(length(min = 1))]
    pub password: Option<String>,
    #[validate(length(min = 1))]
    pub account: Option<String>,
    #[validate(length(min = 1))]
    pub warehouse: Option<String>,
    #[validate(length(min = 1))]
    pub database: Option<String>,
    #[validate(length(min = 1))]
    pub schema: Option<String>,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            user: None,
            password: None,
            account: None,
            warehouse: None,
            database: None,
            schema: None,
        }
    }
}

// Hand-written so the password never reaches a log line.
impl fmt::Debug for WarehouseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WarehouseConfig")
            .field("engine", &self.engine)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("account", &self.account)
            .field("warehouse", &self.warehouse)
            .field("database", &self.database)
            .field("schema", &self.schema)
            .finish()
    }
}

impl WarehouseConfig {
    /// Overlays `PROBITY_*` variables, resolved through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(v) = var("ENGINE") {
            self.engine = v;
        }
        let slots: [(&str, &mut Option<String>); 6] = [
            ("USER", &mut self.user),
            ("PASSWORD", &mut self.password),
            ("ACCOUNT", &mut self.account),
            ("WAREHOUSE", &mut self.warehouse),
            ("DATABASE", &mut self.database),
            ("SCHEMA", &mut self.schema),
        ];
        for (name, slot) in slots {
            if let Some(v) = var(name) {
                info!(setting = name, "Overriding connection setting via ENV");
                *slot = Some(v);
            }
        }
    }

    pub fn schema_or_default(&self) -> &str {
        self.schema.as_deref().unwrap_or(DEFAULT_SCHEMA)
    }
}

fn default_engine() -> String {
    DEFAULT_ENGINE.to_string()
}

/// One named profile of a `connections.yml` file.
#[derive(Debug, Deserialize, Clone)]
pub struct ConnectionProfile {
    pub target: String,
    pub outputs: HashMap<String, WarehouseConfig>,
}

/// Reads `connections.yml` and picks `profile`'s output, `target` overriding
/// the profile's default target.
#[instrument(skip(path))]
pub fn load_profile(
    path: &Path,
    profile: &str,
    target: Option<&str>,
) -> Result<WarehouseConfig, InfrastructureError> {
    info!(path = ?path, "Loading connection profiles");
    let content = fs::read_to_string(path)?;
    let mut profiles: HashMap<String, ConnectionProfile> = serde_yaml::from_str(&content)?;

    let mut chosen = profiles.remove(profile).ok_or_else(|| {
        InfrastructureError::ConfigNotFound(format!("profile '{}' in {:?}", profile, path))
    })?;
    let target = target.unwrap_or(&chosen.target).to_string();

    chosen.outputs.remove(&target).ok_or_else(|| {
        InfrastructureError::ConfigNotFound(format!(
            "target '{}' of profile '{}' in {:?}",
            target, profile, path
        ))
    })
}

/// Full layering: profile file (optional), then the environment seen
/// through `lookup`. The result is validated.
pub fn resolve<F>(
    profile_file: Option<&Path>,
    profile: &str,
    target: Option<&str>,
    lookup: F,
) -> Result<WarehouseConfig, InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match profile_file {
        Some(path) => load_profile(path, profile, target)?,
        None => WarehouseConfig::default(),
    };
    config.apply_env_overrides(lookup);
    config.validate()?;
    Ok(config)
}
