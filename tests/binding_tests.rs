use std::path::{Path, PathBuf};

use propbind::core::binder::BindOptions;
use config::Config;
use propbind::core::config::{BootConfig, load_environment, load_environment_from};
use propbind::core::properties::{AppProperties, DatabaseProperties};
use propbind::core::registration::{BoundProperties, REGISTERED_PREFIXES};
use propbind::core::source::PropertySource;
use propbind::errors::BindError;

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/application.properties")
}

fn no_env() -> Vec<(String, String)> {
    Vec::new()
}

fn config_from(text: &str) -> Config {
    Config::builder()
        .add_source(PropertySource::parse_properties("inline", text).unwrap())
        .build()
        .unwrap()
}

fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn test_registered_prefixes() {
    assert_eq!(REGISTERED_PREFIXES, &["app", "database"]);
}

#[test]
fn test_bound_values_equal_inputs_verbatim() {
    let config = config_from(
        "app.name=Config Manager\n\
         app.version=1.0.0-SNAPSHOT\n\
         database.url=jdbc:mysql://db:3306/cfg?useSSL=false\n\
         database.username=Admin User\n\
         database.password= p@ss word\n",
    );
    let bound = BoundProperties::bind(&config, BindOptions::default()).unwrap();

    assert_eq!(
        bound.app,
        AppProperties {
            name: "Config Manager".to_string(),
            version: "1.0.0-SNAPSHOT".to_string(),
        }
    );
    assert_eq!(bound.database.url, "jdbc:mysql://db:3306/cfg?useSSL=false");
    assert_eq!(bound.database.username, "Admin User");
    assert_eq!(bound.database.password, "p@ss word");
}

#[test]
fn test_missing_keys_leave_fields_empty() {
    let config = config_from("app.name=only-name\n");
    let bound = BoundProperties::bind(&config, BindOptions::default()).unwrap();

    assert_eq!(bound.app.name, "only-name");
    assert_eq!(bound.app.version, "");
    assert_eq!(bound.database, DatabaseProperties::default());
}

#[test]
fn test_empty_environment_binds_defaults() {
    let bound = BoundProperties::bind(&Config::builder().build().unwrap(), BindOptions::default()).unwrap();
    assert_eq!(bound, BoundProperties::default());
}

#[test]
fn test_relaxed_field_names_bind() {
    let config = config_from("APP.NAME=upper\napp.ver-sion=2\nDatabase.User_Name=svc\n");
    let bound = BoundProperties::bind(&config, BindOptions::default()).unwrap();

    assert_eq!(bound.app.name, "upper");
    assert_eq!(bound.app.version, "2");
    assert_eq!(bound.database.username, "svc");
}

#[test]
fn test_unknown_fields_ignored_by_default() {
    let config = config_from("app.name=demo\napp.owner=ops\ndatabase.pool.size=10\nother.key=x\n");
    let bound = BoundProperties::bind(&config, BindOptions::default()).unwrap();

    assert_eq!(bound.app.name, "demo");
}

#[test]
fn test_unknown_fields_rejected_when_strict() {
    let config = config_from("app.name=demo\napp.owner=ops\n");
    let options = BindOptions {
        ignore_unknown_fields: false,
    };
    let err = BoundProperties::bind(&config, options).unwrap_err();

    assert_eq!(
        err,
        BindError::UnknownField {
            key: "app.owner".to_string()
        }
    );
}

#[test]
fn test_strict_mode_ignores_keys_outside_registered_prefixes() {
    let config = config_from("app.name=demo\nserver.port=8080\napplication.title=x\n");
    let options = BindOptions {
        ignore_unknown_fields: false,
    };

    assert!(BoundProperties::bind(&config, options).is_ok());
}

#[test]
fn test_boot_config_defaults() {
    let boot = BootConfig::from_vars(vars(&[("PATH", "/usr/bin")])).unwrap();
    assert_eq!(boot, BootConfig::default());
    assert!(boot.bind_options().ignore_unknown_fields);
}

#[test]
fn test_boot_config_reads_settings() {
    let boot = BootConfig::from_vars(vars(&[
        ("CONFIG_LOCATION", "/etc/app/application.properties"),
        ("CONFIG_IGNORE_UNKNOWN_FIELDS", "false"),
        ("CONFIG_ENV_OVERRIDES", "no"),
    ]))
    .unwrap();

    assert_eq!(
        boot.config_location,
        Some(PathBuf::from("/etc/app/application.properties"))
    );
    assert!(!boot.ignore_unknown_fields);
    assert!(!boot.env_overrides);
}

#[test]
fn test_boot_config_treats_empty_location_as_unset() {
    let boot = BootConfig::from_vars(vars(&[("CONFIG_LOCATION", "")])).unwrap();
    assert_eq!(boot.config_location, None);
}

#[test]
fn test_boot_config_rejects_invalid_flag() {
    let err = BootConfig::from_vars(vars(&[("CONFIG_ENV_OVERRIDES", "sometimes")])).unwrap_err();
    assert!(
        matches!(err, BindError::Coercion { .. }),
        "Unexpected error type: {err:?}"
    );
}

#[test]
fn test_load_environment_from_explicit_file() {
    let boot = BootConfig {
        config_location: Some(fixture_path()),
        ..BootConfig::default()
    };
    let config = load_environment(&boot, no_env()).unwrap();
    let bound = BoundProperties::bind(&config, boot.bind_options()).unwrap();

    assert_eq!(bound.app.name, "Config Manager");
    assert_eq!(bound.app.version, "1.0.0");
    assert_eq!(
        bound.database.url,
        "jdbc:postgresql://localhost:5432/configdb"
    );
    assert_eq!(bound.database.username, "admin");
    assert_eq!(bound.database.password, "s3cr3t!");
}

#[test]
fn test_env_overrides_take_precedence_over_file() {
    let boot = BootConfig {
        config_location: Some(fixture_path()),
        ..BootConfig::default()
    };
    let overrides = vars(&[("APP_VERSION", "9.9.9"), ("DATABASE_USERNAME", "env-user")]);
    let config = load_environment(&boot, overrides).unwrap();
    let bound = BoundProperties::bind(&config, boot.bind_options()).unwrap();

    assert_eq!(bound.app.version, "9.9.9");
    assert_eq!(bound.app.name, "Config Manager");
    assert_eq!(bound.database.username, "env-user");
    assert_eq!(bound.database.password, "s3cr3t!");
}

#[test]
fn test_env_overrides_can_be_disabled() {
    let boot = BootConfig {
        config_location: Some(fixture_path()),
        env_overrides: false,
        ..BootConfig::default()
    };
    let overrides = vars(&[("APP_VERSION", "9.9.9"), ("DATABASE_USERNAME", "env-user")]);
    let config = load_environment(&boot, overrides).unwrap();
    let bound = BoundProperties::bind(&config, boot.bind_options()).unwrap();

    assert_eq!(bound.app.version, "1.0.0");
}

#[test]
fn test_explicit_missing_file_is_fatal() {
    let boot = BootConfig {
        config_location: Some(PathBuf::from("no/such/application.properties")),
        ..BootConfig::default()
    };
    let result = load_environment(&boot, no_env());

    assert!(matches!(result, Err(BindError::Io { .. })));
}

#[test]
fn test_default_file_absent_is_skipped() {
    let config = load_environment(&BootConfig::default(), Vec::new()).unwrap();
    let bound = BoundProperties::bind(&config, BindOptions::default()).unwrap();
    assert_eq!(bound, BoundProperties::default());

    let config = load_environment_from(
        &BootConfig::default(),
        Path::new("no/such/application.properties"),
        vars(&[("APP_NAME", "env-only")]),
    )
    .unwrap();
    let bound = BoundProperties::bind(&config, BindOptions::default()).unwrap();
    assert_eq!(bound.app.name, "env-only");
    assert_eq!(bound.app.version, "");
}

#[test]
fn test_default_file_present_is_loaded() {
    let config = load_environment_from(&BootConfig::default(), &fixture_path(), no_env()).unwrap();
    let bound = BoundProperties::bind(&config, BindOptions::default()).unwrap();

    assert_eq!(bound.app.name, "Config Manager");
    assert_eq!(bound.database.username, "admin");
}

#[test]
fn test_unrelated_env_vars_do_not_bind() {
    let boot = BootConfig {
        config_location: Some(fixture_path()),
        ignore_unknown_fields: false,
        ..BootConfig::default()
    };
    let config = load_environment(
        &boot,
        vars(&[("AWS_LAMBDA_FUNCTION_NAME", "propbind"), ("_HANDLER", "bootstrap")]),
    )
    .unwrap();

    assert!(BoundProperties::bind(&config, boot.bind_options()).is_ok());
}
