//! Tests for configuration loaded from the process environment.

use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use foundry_agents::config::{
    AgentsConfig, Credential, API_KEY_VAR, API_VERSION_VAR, DEFAULT_API_VERSION, ENDPOINT_VAR,
    MAX_WAIT_VAR, MODEL_DEPLOYMENT_VAR, POLL_INTERVAL_VAR, TOKEN_VAR,
};
use foundry_agents::error::AgentsError;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const CONFIG_ENV_VARS: [&str; 7] = [
    ENDPOINT_VAR,
    MODEL_DEPLOYMENT_VAR,
    API_KEY_VAR,
    TOKEN_VAR,
    API_VERSION_VAR,
    POLL_INTERVAL_VAR,
    MAX_WAIT_VAR,
];

struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn capture(keys: &[&str]) -> Self {
        let saved = keys
            .iter()
            .map(|key| ((*key).to_string(), std::env::var(key).ok()))
            .collect();
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}

fn with_env(vars: &[(&str, &str)], test: impl FnOnce()) {
    let _lock = ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = EnvGuard::capture(&CONFIG_ENV_VARS);
    for key in CONFIG_ENV_VARS {
        std::env::remove_var(key);
    }
    for (key, value) in vars {
        std::env::set_var(key, value);
    }
    test();
}

#[test]
fn from_env_reads_project_settings() {
    with_env(
        &[
            (ENDPOINT_VAR, "https://example.services.ai.azure.com/api/projects/demo"),
            (MODEL_DEPLOYMENT_VAR, "gpt-4o"),
            (API_KEY_VAR, "key-1"),
            (POLL_INTERVAL_VAR, "250"),
            (MAX_WAIT_VAR, "60"),
        ],
        || {
            let config = AgentsConfig::from_env().unwrap();

            assert_eq!(
                config.endpoint(),
                Some("https://example.services.ai.azure.com/api/projects/demo")
            );
            assert_eq!(config.require_model_deployment().unwrap(), "gpt-4o");
            assert_eq!(config.credential(), Some(&Credential::ApiKey("key-1".to_string())));
            assert_eq!(config.api_version(), DEFAULT_API_VERSION);

            let policy = config.poll_policy();
            assert_eq!(policy.poll_interval, Duration::from_millis(250));
            assert_eq!(policy.max_wait, Some(Duration::from_secs(60)));
        },
    );
}

#[test]
fn from_env_falls_back_to_bearer_token() {
    with_env(
        &[(ENDPOINT_VAR, "https://example.test"), (TOKEN_VAR, "tok-1")],
        || {
            let config = AgentsConfig::from_env().unwrap();
            assert_eq!(
                config.require_credential().unwrap(),
                &Credential::BearerToken("tok-1".to_string())
            );
        },
    );
}

#[test]
fn from_env_rejects_malformed_poll_interval() {
    with_env(&[(POLL_INTERVAL_VAR, "soon")], || {
        let err = AgentsConfig::from_env().unwrap_err();
        assert!(matches!(err, AgentsError::Configuration(ref m) if m.contains(POLL_INTERVAL_VAR)));
    });
}

#[test]
fn missing_values_are_configuration_errors() {
    with_env(&[], || {
        let config = AgentsConfig::from_env().unwrap();
        assert!(matches!(
            config.require_endpoint(),
            Err(AgentsError::Configuration(_))
        ));
        assert!(matches!(
            foundry_agents::AgentsClient::new(&config),
            Err(AgentsError::Configuration(_))
        ));
    });
}

#[test]
fn debug_output_hides_the_credential() {
    let config = AgentsConfig::new().with_credential(Credential::ApiKey("super-secret".to_string()));
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("api-key"));
}
