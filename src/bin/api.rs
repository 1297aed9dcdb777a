use std::sync::Arc;

use anyhow::Context;
use lambda_runtime::{LambdaEvent, service_fn};
use propbind::api::handler;
use propbind::core::config::{BootConfig, load_environment};
use propbind::core::registration::BoundProperties;
use serde_json::Value;

fn bind_at_startup() -> anyhow::Result<BoundProperties> {
    let boot = BootConfig::from_env().context("invalid boot configuration")?;
    let config =
        load_environment(&boot, std::env::vars()).context("failed to load configuration")?;
    BoundProperties::bind(&config, boot.bind_options())
        .context("failed to bind configuration properties")
}

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    propbind::setup_logging();

    let properties = Arc::new(bind_at_startup()?);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let properties = Arc::clone(&properties);
        async move { handler(&properties, event).await }
    }))
    .await
}
