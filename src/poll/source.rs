//! Collaborators that report the current state of a run.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Run;
use crate::util::retry::RetryPolicy;

/// Capability to read the current state of a run by id.
///
/// Implementations should fail with a transport-level error only when the
/// service could not answer; a run whose status is `failed` is a successful
/// fetch.
#[async_trait]
pub trait RunStatusSource: Send + Sync {
    async fn fetch_run(&self, run_id: &str) -> Result<Run>;
}

#[async_trait]
impl<S: RunStatusSource + ?Sized> RunStatusSource for &S {
    async fn fetch_run(&self, run_id: &str) -> Result<Run> {
        (**self).fetch_run(run_id).await
    }
}

#[async_trait]
impl<S: RunStatusSource + ?Sized> RunStatusSource for Arc<S> {
    async fn fetch_run(&self, run_id: &str) -> Result<Run> {
        (**self).fetch_run(run_id).await
    }
}

/// Wraps a source so retryable fetch failures are retried with backoff.
///
/// The poller never retries on its own; wrap the source in this to opt in.
#[derive(Debug, Clone)]
pub struct RetryingSource<S> {
    inner: S,
    policy: RetryPolicy,
}

impl<S> RetryingSource<S> {
    pub fn new(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: RunStatusSource> RunStatusSource for RetryingSource<S> {
    async fn fetch_run(&self, run_id: &str) -> Result<Run> {
        let inner = &self.inner;
        self.policy.execute(move || inner.fetch_run(run_id)).await
    }
}
