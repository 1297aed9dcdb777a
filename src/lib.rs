//! propbind - binds externalized `.properties` configuration onto typed
//! records and serves the bound values over HTTP from AWS Lambda.
//!
//! # Architecture
//!
//! The crate is split into:
//! - `core::source` for the `.properties` parser, plugged into `config`
//! - `core::config` for layering the file under environment overrides
//! - `core::binder` for the serde-driven prefix → struct mapping
//! - `core::registration` for the holders bound once at startup
//! - `api` for the Lambda handler rendering `/info` and `/dbinfo`
//!
//! # Example
//!
//! ```
//! use propbind::core::binder::BindOptions;
//! use propbind::core::registration::BoundProperties;
//! use propbind::core::source::PropertySource;
//!
//! let source = PropertySource::parse_properties(
//!     "inline",
//!     "app.name=demo\napp.version=1.0\ndatabase.url=postgres://db\n",
//! )
//! .unwrap();
//! let config = config::Config::builder().add_source(source).build().unwrap();
//!
//! let bound = BoundProperties::bind(&config, BindOptions::default()).unwrap();
//! assert_eq!(
//!     propbind::api::render::render_app_info(&bound.app),
//!     "App Name: demo, Version: 1.0"
//! );
//! ```

// Module declarations
pub mod api;
pub mod core;
pub mod errors;

pub use errors::BindError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration, filtered by `RUST_LOG` (default `info`). It
/// should be called once, before configuration is bound.
///
/// # Example
///
/// ```
/// propbind::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
