//! Unified error classification and recovery.

use serde::{Deserialize, Serialize};

/// Machine-readable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidCredentials,
    RateLimitExceeded,
    ResourceNotFound,
    InvalidRequest,
    ServerError,
    ServiceUnavailable,
    Timeout,
    Unknown,
}

impl ErrorCode {
    /// Map the service's free-form error code onto a known code.
    pub fn from_service_code(code: &str) -> Self {
        match code {
            "Unauthorized" | "PermissionDenied" | "invalid_api_key" | "AuthenticationFailed" => {
                Self::InvalidCredentials
            }
            "TooManyRequests" | "rate_limit_exceeded" => Self::RateLimitExceeded,
            "NotFound" | "not_found" | "ResourceNotFound" => Self::ResourceNotFound,
            "BadRequest" | "invalid_request_error" | "UserError" | "ValidationError" => {
                Self::InvalidRequest
            }
            "InternalServerError" | "server_error" => Self::ServerError,
            "ServiceUnavailable" => Self::ServiceUnavailable,
            "Timeout" | "RequestTimeout" => Self::Timeout,
            _ => Self::Unknown,
        }
    }
}

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Network,
    Timeout,
    Server,
    Api,
    Configuration,
    Serialization,
    NotFound,
    InvalidRequest,
}

/// Structured details returned by the service in an error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: Option<ErrorCode>,
    pub provider_code: Option<String>,
    pub param: Option<String>,
    pub request_id: Option<String>,
}

/// Suggested recovery action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    RetryWithBackoff,
    CheckCredentials,
    CheckConfiguration,
    CheckResourceId,
    IncreaseTimeout,
    FixRequest,
    ContactSupport,
}
