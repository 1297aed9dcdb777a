//! API Lambda handler - thin router over the bound properties.
//!
//! This module handles:
//! - Path and method extraction for HTTP API v2 and REST v1 events
//! - `GET /info` and `GET /dbinfo` (delegated to `render`)
//! - 400/404/405 responses for everything else

use super::{helpers, parsing, render};
use crate::core::registration::BoundProperties;
use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info, warn};

pub use self::function_handler as handler;

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Never fails in practice: every request maps to a status-code response.
/// The `Result` matches the shape `lambda_runtime::service_fn` expects.
#[tracing::instrument(level = "info", skip(properties, event), fields(request_id = %event.context.request_id))]
pub async fn function_handler(
    properties: &BoundProperties,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    Ok(route_request(properties, &event.payload))
}

/// Routes a raw HTTP event to the matching renderer.
#[must_use]
pub fn route_request(properties: &BoundProperties, payload: &Value) -> Value {
    let Some(raw_path) = parsing::request_path(payload) else {
        error!("Request missing path");
        return helpers::err_response(400, "Missing path");
    };
    let path = parsing::normalize_path(raw_path);
    let method = parsing::request_method(payload);

    info!(path = %path, method = %method, "Request received");

    let body = match path {
        "/info" => render::render_app_info(&properties.app),
        "/dbinfo" => render::render_db_info(&properties.database),
        _ => {
            warn!(path = %path, "No route for path");
            return helpers::err_response(404, "Not Found");
        }
    };

    match method.as_str() {
        "GET" => helpers::ok_text(&body),
        "HEAD" => helpers::ok_head(),
        _ => {
            warn!(path = %path, method = %method, "Method not allowed");
            helpers::method_not_allowed("GET")
        }
    }
}
