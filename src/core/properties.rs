//! Property holders bound at startup.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::binder::PropertyHolder;

const REDACTED: &str = "******";

/// Application identity, bound from `app.*`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppProperties {
    pub name: String,
    pub version: String,
}

impl PropertyHolder for AppProperties {
    const PREFIX: &'static str = "app";
    const FIELDS: &'static [&'static str] = &["name", "version"];
}

/// Database connection settings, bound from `database.*`.
///
/// `password` is kept out of `Debug` and serialized output.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseProperties {
    pub url: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl fmt::Debug for DatabaseProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseProperties")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}

impl PropertyHolder for DatabaseProperties {
    const PREFIX: &'static str = "database";
    const FIELDS: &'static [&'static str] = &["url", "username", "password"];
}
