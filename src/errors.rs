use config::ConfigError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BindError {
    #[error("Failed to read configuration file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse {source_name} at line {line}: {message}")]
    Parse {
        source_name: String,
        line: usize,
        message: String,
    },

    #[error("Failed to convert '{key}' to {value_type}: {message}")]
    Coercion {
        key: String,
        value_type: &'static str,
        message: String,
    },

    #[error("Unknown configuration property '{key}'")]
    UnknownField { key: String },

    #[error("Failed to assemble configuration: {0}")]
    ConfigError(String),
}

impl BindError {
    pub fn io(path: impl Into<String>, error: &std::io::Error) -> Self {
        BindError::Io {
            path: path.into(),
            message: error.to_string(),
        }
    }
}

impl From<ConfigError> for BindError {
    fn from(error: ConfigError) -> Self {
        let message = error.to_string();
        match error {
            ConfigError::Type { key, expected, .. } => BindError::Coercion {
                key: key.unwrap_or_default(),
                value_type: expected,
                message,
            },
            _ => BindError::ConfigError(message),
        }
    }
}
