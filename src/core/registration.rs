//! The closed set of property holders bound before the service accepts
//! requests.

use config::Config;
use serde::Serialize;
use tracing::info;

use super::binder::{BindOptions, Binder, PropertyHolder};
use super::properties::{AppProperties, DatabaseProperties};
use crate::errors::BindError;

/// Prefixes of every registered holder.
pub const REGISTERED_PREFIXES: &[&str] = &[AppProperties::PREFIX, DatabaseProperties::PREFIX];

/// All registered holders, populated once and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoundProperties {
    pub app: AppProperties,
    pub database: DatabaseProperties,
}

impl BoundProperties {
    /// Binds every registered holder from `config`.
    ///
    /// # Errors
    ///
    /// Returns the first `BindError` raised by any holder.
    pub fn bind(config: &Config, options: BindOptions) -> Result<Self, BindError> {
        let binder = Binder::new(config, options);
        let bound = Self {
            app: binder.bind()?,
            database: binder.bind()?,
        };

        info!(
            app.name = %bound.app.name,
            app.version = %bound.app.version,
            database.url = %bound.database.url,
            database.username = %bound.database.username,
            "Bound configuration properties"
        );

        Ok(bound)
    }
}
