//! Binding of prefixed `config` tables onto property holders.

use config::{Config, ConfigError, Map, Value};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::errors::BindError;

/// A flat record populated from every key under `PREFIX`.
///
/// Implementors derive `Deserialize` with `#[serde(default)]` so missing keys
/// keep their default value.
pub trait PropertyHolder: DeserializeOwned + Default {
    const PREFIX: &'static str;

    /// Field names, as they appear after the prefix.
    const FIELDS: &'static [&'static str];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindOptions {
    /// Keys under a holder's prefix that match no field are skipped with a
    /// warning when `true`, and rejected when `false`.
    pub ignore_unknown_fields: bool,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            ignore_unknown_fields: true,
        }
    }
}

pub struct Binder<'a> {
    config: &'a Config,
    options: BindOptions,
}

impl<'a> Binder<'a> {
    #[must_use]
    pub fn new(config: &'a Config, options: BindOptions) -> Self {
        Self { config, options }
    }

    /// Builds a `T` from the table under `T::PREFIX`. Missing keys leave the
    /// field at its default.
    ///
    /// # Errors
    ///
    /// Returns `BindError::Coercion` when a value does not fit its field, or
    /// `BindError::UnknownField` when unknown keys are rejected.
    pub fn bind<T: PropertyHolder>(&self) -> Result<T, BindError> {
        let table = self.table(T::PREFIX)?;

        for field in T::FIELDS {
            if !table.contains_key(*field) {
                debug!(key = %format!("{}.{field}", T::PREFIX), "No value configured, keeping default");
            }
        }

        let mut unknown: Vec<&String> = table
            .keys()
            .filter(|key| !T::FIELDS.contains(&key.as_str()))
            .collect();
        unknown.sort();

        for field in unknown {
            let key = format!("{}.{field}", T::PREFIX);
            if self.options.ignore_unknown_fields {
                warn!(key = %key, prefix = T::PREFIX, "Ignoring unknown configuration property");
            } else {
                return Err(BindError::UnknownField { key });
            }
        }

        if table.is_empty() {
            return Ok(T::default());
        }

        self.config.get::<T>(T::PREFIX).map_err(BindError::from)
    }

    fn table(&self, prefix: &str) -> Result<Map<String, Value>, BindError> {
        match self.config.get_table(prefix) {
            Ok(table) => Ok(table),
            Err(ConfigError::NotFound(_)) => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }
}
