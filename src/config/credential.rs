//! Static credentials attached to every request.

use std::fmt;

use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION};

use crate::error::{AgentsError, Result};

/// How requests authenticate against the service.
///
/// Token acquisition and refresh are the caller's business; the client only
/// attaches what it is given.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Sent as the `api-key` header.
    ApiKey(String),
    /// Sent as `Authorization: Bearer <token>`.
    BearerToken(String),
}

impl Credential {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ApiKey(_) => "api-key",
            Self::BearerToken(_) => "bearer",
        }
    }

    /// Header to attach to each request.
    pub fn header(&self) -> Result<(HeaderName, HeaderValue)> {
        let (name, raw) = match self {
            Self::ApiKey(key) => (HeaderName::from_static("api-key"), key.clone()),
            Self::BearerToken(token) => (AUTHORIZATION, format!("Bearer {token}")),
        };
        let mut value = HeaderValue::from_str(&raw).map_err(|_| {
            AgentsError::Configuration(format!("{} credential contains invalid characters", self.kind()))
        })?;
        value.set_sensitive(true);
        Ok((name, value))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.kind()).finish()
    }
}
