//! Response builders shared by the API handlers.

use serde_json::{Value, json};

pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Returns a 200 OK response with a plain-text body.
#[must_use]
pub fn ok_text(body: &str) -> Value {
    json!({
        "statusCode": 200,
        "headers": { "Content-Type": TEXT_PLAIN },
        "body": body
    })
}

/// Returns a 200 OK response with the headers of `ok_text` and no body.
#[must_use]
pub fn ok_head() -> Value {
    json!({
        "statusCode": 200,
        "headers": { "Content-Type": TEXT_PLAIN },
        "body": ""
    })
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": "application/json" },
        "body": json!({ "error": message }).to_string()
    })
}

/// Returns a 405 response advertising the allowed methods.
#[must_use]
pub fn method_not_allowed(allow: &str) -> Value {
    json!({
        "statusCode": 405,
        "headers": { "Content-Type": "application/json", "Allow": allow },
        "body": json!({ "error": "Method Not Allowed" }).to_string()
    })
}
