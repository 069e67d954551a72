//! Response-to-error mapping shared by every client call.

use reqwest::header::{HeaderMap, HeaderName, RETRY_AFTER};
use serde::Deserialize;

use crate::error::{AgentsError, ErrorCode, ErrorDetails};

/// Correlation id sent with every request.
pub const CLIENT_REQUEST_ID: HeaderName = HeaderName::from_static("x-ms-client-request-id");

const REQUEST_ID_HEADERS: [&str; 3] = ["x-ms-request-id", "apim-request-id", "x-request-id"];

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ServiceError,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    param: Option<String>,
}

/// Map a non-success response onto an [`AgentsError`].
pub fn status_to_error(status: u16, headers: &HeaderMap, body: &str) -> AgentsError {
    let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok().map(|e| e.error);
    let message = parsed
        .as_ref()
        .and_then(|e| e.message.clone())
        .unwrap_or_else(|| body.to_string());

    match status {
        401 | 403 => AgentsError::Authentication(message),
        404 => AgentsError::NotFound(message),
        429 => AgentsError::RateLimited {
            retry_after_ms: retry_after_ms(headers),
        },
        _ => match parsed {
            Some(error) => {
                let details = ErrorDetails {
                    code: error.code.as_deref().map(ErrorCode::from_service_code),
                    provider_code: error.code,
                    param: error.param,
                    request_id: request_id(headers),
                };
                AgentsError::api_with_details(status, message, details)
            }
            None => AgentsError::api(status, message),
        },
    }
}

/// `retry-after-ms` or `retry-after` (seconds), whichever the service sent.
fn retry_after_ms(headers: &HeaderMap) -> Option<u64> {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    if let Some(ms) = header("retry-after-ms").and_then(|v| v.trim().parse::<u64>().ok()) {
        return Some(ms);
    }
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<f64>().ok())
        .map(|secs| (secs * 1000.0) as u64)
}

fn request_id(headers: &HeaderMap) -> Option<String> {
    REQUEST_ID_HEADERS.iter().find_map(|name| {
        headers
            .get(*name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    })
}
