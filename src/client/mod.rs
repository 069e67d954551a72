//! HTTP client for the hosted agent service.
//!
//! Operations are grouped by resource in the submodules, all as methods on
//! [`AgentsClient`].

pub mod agents;
pub mod http;
pub mod messages;
pub mod pagination;
pub mod run_steps;
pub mod runs;
pub mod threads;

pub use runs::ThreadRuns;

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::config::{AgentsConfig, Credential};
use crate::error::{AgentsError, Result};

use self::http::{status_to_error, CLIENT_REQUEST_ID};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for one project of the agent service.
///
/// Cheap to clone; clones share the connection pool. Build one per project
/// and pass it where it is needed.
#[derive(Debug, Clone)]
pub struct AgentsClient {
    http: reqwest::Client,
    endpoint: String,
    api_version: String,
    credential: Credential,
}

impl AgentsClient {
    /// Build a client from configuration. Requires an endpoint and a credential.
    pub fn new(config: &AgentsConfig) -> Result<Self> {
        let endpoint = config.require_endpoint()?;
        reqwest::Url::parse(endpoint).map_err(|e| {
            AgentsError::Configuration(format!("invalid project endpoint {endpoint:?}: {e}"))
        })?;
        let credential = config.require_credential()?.clone();
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_version: config.api_version().to_string(),
            credential,
        })
    }

    /// Use a caller-provided reqwest client (proxies, custom timeouts).
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.endpoint, path.trim_start_matches('/'));
        debug!(method = %method, path, "agents service request");
        self.http
            .request(method, url)
            .query(&[("api-version", self.api_version.as_str())])
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let (name, value) = self.credential.header()?;
        let resp = request
            .header(name, value)
            .header(CLIENT_REQUEST_ID, Uuid::new_v4().to_string())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let headers = resp.headers().clone();
            let body = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status.as_u16(), &headers, &body));
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.execute(self.request(Method::GET, path).query(query)).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::POST, path).json(body)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(self.request(Method::DELETE, path)).await
    }
}

/// Reject empty resource ids before they turn into a malformed path.
pub(crate) fn require_id<'a>(kind: &str, id: &'a str) -> Result<&'a str> {
    if id.trim().is_empty() {
        Err(AgentsError::InvalidArgument(format!("{kind} id must not be empty")))
    } else {
        Ok(id)
    }
}
