//! Configuration (layered: code > env > `.env` file).

pub mod credential;

pub use credential::Credential;

use std::fmt;
use std::time::Duration;

use crate::error::{AgentsError, Result};
use crate::poll::PollPolicy;

/// Service API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "2025-05-01";

pub const ENDPOINT_VAR: &str = "AZURE_AI_FOUNDRY_PROJECT_ENDPOINT";
pub const MODEL_DEPLOYMENT_VAR: &str = "AZURE_AI_FOUNDRY_MODEL_DEPLOYMENT_NAME";
pub const API_KEY_VAR: &str = "AZURE_AI_AGENTS_API_KEY";
pub const TOKEN_VAR: &str = "AZURE_AI_AGENTS_TOKEN";
pub const API_VERSION_VAR: &str = "AZURE_AI_AGENTS_API_VERSION";
pub const BING_CONNECTION_VAR: &str = "BING_CONNECTION_ID";
pub const AGENT_ID_VAR: &str = "AZURE_AI_AGENTS_AGENT_ID";
pub const THREAD_ID_VAR: &str = "AZURE_AI_AGENTS_THREAD_ID";
pub const POLL_INTERVAL_VAR: &str = "AZURE_AI_AGENTS_POLL_INTERVAL_MS";
pub const MAX_WAIT_VAR: &str = "AZURE_AI_AGENTS_MAX_WAIT_SECS";

/// Settings for talking to one project of the agent service.
///
/// Every value can be set in code; [`AgentsConfig::from_env`] fills in the
/// ones present in the environment.
#[derive(Clone, Default)]
pub struct AgentsConfig {
    endpoint: Option<String>,
    api_version: Option<String>,
    credential: Option<Credential>,
    model_deployment: Option<String>,
    bing_connection_id: Option<String>,
    agent_id: Option<String>,
    thread_id: Option<String>,
    poll_interval: Option<Duration>,
    max_wait: Option<Duration>,
}

impl fmt::Debug for AgentsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentsConfig")
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .field("credential", &self.credential.as_ref().map(Credential::kind))
            .field("model_deployment", &self.model_deployment)
            .field("bing_connection_id", &self.bing_connection_id)
            .field("agent_id", &self.agent_id)
            .field("thread_id", &self.thread_id)
            .field("poll_interval", &self.poll_interval)
            .field("max_wait", &self.max_wait)
            .finish()
    }
}

impl AgentsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup.
    ///
    /// Empty values count as unset. Numeric poll settings that do not parse,
    /// and a zero poll interval, are configuration errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let credential = match (get(API_KEY_VAR), get(TOKEN_VAR)) {
            (Some(key), _) => Some(Credential::ApiKey(key)),
            (None, Some(token)) => Some(Credential::BearerToken(token)),
            (None, None) => None,
        };

        let poll_interval = get(POLL_INTERVAL_VAR)
            .map(|raw| match parse_u64(POLL_INTERVAL_VAR, &raw)? {
                0 => Err(AgentsError::Configuration(format!(
                    "{POLL_INTERVAL_VAR} must be greater than zero"
                ))),
                millis => Ok(Duration::from_millis(millis)),
            })
            .transpose()?;
        let max_wait = get(MAX_WAIT_VAR)
            .map(|raw| parse_u64(MAX_WAIT_VAR, &raw).map(Duration::from_secs))
            .transpose()?;

        Ok(Self {
            endpoint: get(ENDPOINT_VAR),
            api_version: get(API_VERSION_VAR),
            credential,
            model_deployment: get(MODEL_DEPLOYMENT_VAR),
            bing_connection_id: get(BING_CONNECTION_VAR),
            agent_id: get(AGENT_ID_VAR),
            thread_id: get(THREAD_ID_VAR),
            poll_interval,
            max_wait,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn with_model_deployment(mut self, model: impl Into<String>) -> Self {
        self.model_deployment = Some(model.into());
        self
    }

    pub fn with_bing_connection_id(mut self, connection_id: impl Into<String>) -> Self {
        self.bing_connection_id = Some(connection_id.into());
        self
    }

    pub fn with_agent_id(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    pub fn with_thread_id(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Project endpoint, or a configuration error naming the variable to set.
    pub fn require_endpoint(&self) -> Result<&str> {
        require(self.endpoint.as_deref(), ENDPOINT_VAR, "project endpoint")
    }

    pub fn api_version(&self) -> &str {
        self.api_version.as_deref().unwrap_or(DEFAULT_API_VERSION)
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn require_credential(&self) -> Result<&Credential> {
        self.credential.as_ref().ok_or_else(|| {
            AgentsError::Configuration(format!(
                "missing credential: set {API_KEY_VAR} or {TOKEN_VAR}"
            ))
        })
    }

    pub fn model_deployment(&self) -> Option<&str> {
        self.model_deployment.as_deref()
    }

    pub fn require_model_deployment(&self) -> Result<&str> {
        require(
            self.model_deployment.as_deref(),
            MODEL_DEPLOYMENT_VAR,
            "model deployment name",
        )
    }

    pub fn bing_connection_id(&self) -> Option<&str> {
        self.bing_connection_id.as_deref()
    }

    pub fn require_bing_connection_id(&self) -> Result<&str> {
        require(
            self.bing_connection_id.as_deref(),
            BING_CONNECTION_VAR,
            "Bing connection id",
        )
    }

    pub fn agent_id(&self) -> Option<&str> {
        self.agent_id.as_deref()
    }

    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    /// Poll policy with the configured interval and bound applied over the defaults.
    pub fn poll_policy(&self) -> PollPolicy {
        let mut policy = PollPolicy::default();
        if let Some(interval) = self.poll_interval {
            policy = policy.with_poll_interval(interval);
        }
        if let Some(max_wait) = self.max_wait {
            policy = policy.with_max_wait(max_wait);
        }
        policy
    }
}

fn require<'a>(value: Option<&'a str>, var: &str, what: &str) -> Result<&'a str> {
    value.ok_or_else(|| AgentsError::Configuration(format!("missing {what}: set {var}")))
}

fn parse_u64(var: &str, raw: &str) -> Result<u64> {
    raw.trim().parse().map_err(|_| {
        AgentsError::Configuration(format!("{var} must be a non-negative integer, got {raw:?}"))
    })
}
