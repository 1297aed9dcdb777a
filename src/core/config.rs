use std::env;
use std::path::{Path, PathBuf};

use config::{Config, Environment, Map};
use serde::Deserialize;
use tracing::{debug, info};

use super::binder::BindOptions;
use super::registration::REGISTERED_PREFIXES;
use super::source::PropertySource;
use crate::errors::BindError;

pub const DEFAULT_CONFIG_FILE: &str = "application.properties";

/// How the process locates and binds its configuration, read from
/// `CONFIG_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    /// Explicit file path; when set the file must exist.
    #[serde(rename = "location")]
    pub config_location: Option<PathBuf>,
    pub ignore_unknown_fields: bool,
    /// Whether environment variables override file values.
    pub env_overrides: bool,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            config_location: None,
            ignore_unknown_fields: true,
            env_overrides: true,
        }
    }
}

impl BootConfig {
    pub fn from_env() -> Result<Self, BindError> {
        Self::from_vars(env::vars())
    }

    /// Reads `CONFIG_LOCATION`, `CONFIG_IGNORE_UNKNOWN_FIELDS` and
    /// `CONFIG_ENV_OVERRIDES` from `vars`.
    pub fn from_vars<I>(vars: I) -> Result<Self, BindError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: Map<String, String> = vars.into_iter().collect();
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("CONFIG")
                    .prefix_separator("_")
                    .source(Some(vars)),
            )
            .build()?;

        let mut boot: Self = config.try_deserialize()?;
        boot.config_location = boot
            .config_location
            .filter(|path| !path.as_os_str().is_empty());
        Ok(boot)
    }

    #[must_use]
    pub fn bind_options(&self) -> BindOptions {
        BindOptions {
            ignore_unknown_fields: self.ignore_unknown_fields,
        }
    }
}

fn is_registered(var_name: &str) -> bool {
    let name = var_name.to_lowercase();
    REGISTERED_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(&format!("{prefix}_")))
}

/// Assembles the configuration from `application.properties` in the working
/// directory (or `CONFIG_LOCATION`) and environment overrides.
///
/// # Errors
///
/// Fails if an explicitly configured file is missing or any file is malformed.
pub fn load_environment<I>(boot: &BootConfig, env_vars: I) -> Result<Config, BindError>
where
    I: IntoIterator<Item = (String, String)>,
{
    load_environment_from(boot, Path::new(DEFAULT_CONFIG_FILE), env_vars)
}

/// Like `load_environment`, with `default_path` used when no
/// `config_location` is set. A missing default file is skipped.
///
/// Environment variables under a registered prefix are layered above the
/// file, mapping `APP_NAME` to `app.name`.
///
/// # Errors
///
/// Fails if an explicitly configured file is missing or any file is malformed.
pub fn load_environment_from<I>(
    boot: &BootConfig,
    default_path: &Path,
    env_vars: I,
) -> Result<Config, BindError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let file = match &boot.config_location {
        Some(path) => Some(PropertySource::load_file(path)?),
        None if default_path.is_file() => Some(PropertySource::load_file(default_path)?),
        None => {
            debug!(path = %default_path.display(), "Default configuration file not found");
            None
        }
    };

    let mut builder = Config::builder();
    let mut source_names: Vec<String> = Vec::new();

    if let Some(file) = file {
        #[cfg(feature = "debug-logs")]
        debug!(keys = ?file.keys().collect::<Vec<_>>(), "Properties file keys");

        source_names.push(file.name().to_string());
        builder = builder.add_source(file);
    }

    if boot.env_overrides {
        let overrides: Map<String, String> = env_vars
            .into_iter()
            .filter(|(name, _)| is_registered(name))
            .map(|(name, value)| (name.to_lowercase(), value))
            .collect();
        source_names.push(format!("environment ({} overrides)", overrides.len()));
        builder = builder.add_source(Environment::default().separator("_").source(Some(overrides)));
    }

    info!(sources = ?source_names, "Configuration environment assembled");

    builder.build().map_err(BindError::from)
}
