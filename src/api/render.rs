//! Plain-text renderings of the bound properties.

use crate::core::properties::{AppProperties, DatabaseProperties};

#[must_use]
pub fn render_app_info(app: &AppProperties) -> String {
    format!("App Name: {}, Version: {}", app.name, app.version)
}

/// The password is never part of the rendering.
#[must_use]
pub fn render_db_info(database: &DatabaseProperties) -> String {
    format!("DB URL: {}, Username: {}", database.url, database.username)
}
