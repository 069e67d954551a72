//! Tests for the run poller, driven by a scripted status source on a paused clock.

mod common;

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use common::{ScriptedSource, Step};
use foundry_agents::error::AgentsError;
use foundry_agents::poll::{wait_until_terminal, PollError, PollPolicy, RetryingSource};
use foundry_agents::types::RunStatus;
use foundry_agents::util::retry::RetryPolicy;

fn every_second() -> PollPolicy {
    PollPolicy::default().with_poll_interval(Duration::from_secs(1))
}

#[tokio::test(start_paused = true)]
async fn returns_first_terminal_status_after_one_fetch_per_entry() {
    let cases: Vec<(Vec<&str>, RunStatus, usize)> = vec![
        (vec!["completed"], RunStatus::Completed, 1),
        (vec!["queued", "completed", "in_progress"], RunStatus::Completed, 2),
        (
            vec!["queued", "in_progress", "in_progress", "in_progress", "expired", "completed"],
            RunStatus::Expired,
            5,
        ),
        (vec!["in_progress", "cancelled"], RunStatus::Cancelled, 2),
        (vec!["requires_action", "in_progress", "failed"], RunStatus::Failed, 3),
    ];

    for (statuses, expected_status, expected_fetches) in cases {
        let source = ScriptedSource::new().with_statuses("run_1", &statuses);
        let run = wait_until_terminal(&source, "run_1", &every_second(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(run.status, expected_status, "script {statuses:?}");
        assert_eq!(source.fetches(), expected_fetches, "script {statuses:?}");
    }
}

#[tokio::test(start_paused = true)]
async fn sleeps_one_interval_between_consecutive_fetches() {
    let source = ScriptedSource::new().with_statuses("run_1", &["queued", "in_progress", "completed"]);
    let started = Instant::now();

    let run = wait_until_terminal(&source, "run_1", &every_second(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(run.id, "run_1");
    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(source.fetches(), 3);
    assert_eq!(started.elapsed(), Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn terminal_first_observation_returns_without_sleeping() {
    let source = ScriptedSource::new().with_statuses("run_1", &["completed"]);
    let started = Instant::now();

    wait_until_terminal(&source, "run_1", &every_second(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn times_out_with_last_observed_run() {
    let source = ScriptedSource::new().with_statuses("run_1", &["in_progress"]);
    let policy = every_second().with_max_wait(Duration::from_secs(3));
    let started = Instant::now();

    let err = wait_until_terminal(&source, "run_1", &policy, &CancellationToken::new())
        .await
        .unwrap_err();

    match &err {
        PollError::TimeoutExceeded { waited, last_run } => {
            assert_eq!(*waited, Duration::from_secs(3));
            assert_eq!(last_run.status, RunStatus::InProgress);
        }
        other => panic!("expected timeout, got {other:?}"),
    }
    assert!(err.is_timeout());
    assert_eq!(source.fetches(), 3);
    assert_eq!(started.elapsed(), Duration::from_secs(3));
    assert!(err.to_string().contains("run_1 still in_progress"));
}

#[tokio::test(start_paused = true)]
async fn max_wait_shorter_than_interval_cuts_the_sleep() {
    let source = ScriptedSource::new().with_statuses("run_1", &["queued"]);
    let policy = PollPolicy::default()
        .with_poll_interval(Duration::from_secs(10))
        .with_max_wait(Duration::from_secs(3));
    let started = Instant::now();

    let err = wait_until_terminal(&source, "run_1", &policy, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert_eq!(err.last_run().map(|run| run.status.clone()), Some(RunStatus::Queued));
    assert_eq!(source.fetches(), 1);
    assert_eq!(started.elapsed(), Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn deadline_abandons_a_stalled_fetch() {
    let source = ScriptedSource::new().with_script(
        "run_1",
        vec![
            Step::status("in_progress"),
            Step::stalled(Duration::from_secs(100), "completed"),
        ],
    );
    let policy = every_second().with_max_wait(Duration::from_secs(3));
    let started = Instant::now();

    let err = wait_until_terminal(&source, "run_1", &policy, &CancellationToken::new())
        .await
        .unwrap_err();

    match &err {
        PollError::TimeoutExceeded { waited, last_run } => {
            assert_eq!(*waited, Duration::from_secs(3));
            assert_eq!(last_run.status, RunStatus::InProgress);
        }
        other => panic!("expected timeout, got {other:?}"),
    }
    assert_eq!(source.fetches(), 2);
    assert_eq!(started.elapsed(), Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn first_fetch_completes_even_past_the_deadline() {
    let source = ScriptedSource::new().with_script(
        "run_1",
        vec![Step::stalled(Duration::from_secs(10), "in_progress")],
    );
    let policy = every_second().with_max_wait(Duration::from_secs(3));
    let started = Instant::now();

    let err = wait_until_terminal(&source, "run_1", &policy, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert_eq!(err.last_run().map(|run| run.status.clone()), Some(RunStatus::InProgress));
    assert_eq!(source.fetches(), 1);
    assert_eq!(started.elapsed(), Duration::from_secs(10));
}

#[tokio::test(start_paused = true)]
async fn transport_error_surfaces_immediately_without_retry() {
    let source = ScriptedSource::new().with_script(
        "run_1",
        vec![Step::TransportError(503), Step::status("completed")],
    );
    let started = Instant::now();

    let err = wait_until_terminal(&source, "run_1", &every_second(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err.transport_error(),
        Some(AgentsError::Api { status: 503, .. })
    ));
    assert_eq!(source.fetches(), 1);
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn transport_error_after_pending_observations_still_surfaces() {
    let source = ScriptedSource::new().with_script(
        "run_1",
        vec![
            Step::status("queued"),
            Step::status("in_progress"),
            Step::TransportError(500),
        ],
    );

    let err = wait_until_terminal(&source, "run_1", &every_second(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, PollError::Transport(_)));
    assert_eq!(source.fetches(), 3);
}

#[tokio::test(start_paused = true)]
async fn failed_run_is_a_result_not_an_error() {
    let source = ScriptedSource::new().with_script(
        "run_1",
        vec![Step::failed_run("rate_limit_exceeded", "Rate limit is exceeded.")],
    );

    let run = wait_until_terminal(&source, "run_1", &every_second(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(run.status, RunStatus::Failed);
    let last_error = run.last_error.expect("failed run carries last_error");
    assert_eq!(last_error.code, "rate_limit_exceeded");
    assert_eq!(last_error.message, "Rate limit is exceeded.");
}

#[tokio::test(start_paused = true)]
async fn cancellation_between_polls_stops_without_another_fetch() {
    let source = Arc::new(ScriptedSource::new().with_statuses("run_1", &["in_progress"]));
    let cancel = CancellationToken::new();
    let policy = PollPolicy::default().with_poll_interval(Duration::from_secs(10));

    let task = {
        let source = source.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { wait_until_terminal(&*source, "run_1", &policy, &cancel).await })
    };

    tokio::time::sleep(Duration::from_secs(15)).await;
    cancel.cancel();
    let err = task.await.unwrap().unwrap_err();

    assert!(matches!(err, PollError::Cancelled { polls: 2 }));
    assert_eq!(source.fetches(), 2);

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(source.fetches(), 2);
}

#[tokio::test(start_paused = true)]
async fn already_cancelled_token_issues_no_fetch() {
    let source = ScriptedSource::new().with_statuses("run_1", &["completed"]);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = wait_until_terminal(&source, "run_1", &every_second(), &cancel)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(source.fetches(), 0);
}

#[tokio::test(start_paused = true)]
async fn concurrent_waits_for_distinct_runs_are_independent() {
    let source = ScriptedSource::new()
        .with_statuses("run_a", &["queued", "in_progress", "completed"])
        .with_statuses("run_b", &["in_progress", "failed"]);
    let policy = every_second();
    let cancel = CancellationToken::new();

    let (a, b) = tokio::join!(
        wait_until_terminal(&source, "run_a", &policy, &cancel),
        wait_until_terminal(&source, "run_b", &policy, &cancel),
    );

    assert_eq!(a.unwrap().status, RunStatus::Completed);
    assert_eq!(b.unwrap().status, RunStatus::Failed);
    assert_eq!(source.fetches_for("run_a"), 3);
    assert_eq!(source.fetches_for("run_b"), 2);
}

#[tokio::test(start_paused = true)]
async fn requires_action_keeps_polling_by_default() {
    let source = ScriptedSource::new()
        .with_statuses("run_1", &["requires_action", "requires_action", "completed"]);

    let run = wait_until_terminal(&source, "run_1", &every_second(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(source.fetches(), 3);
}

#[tokio::test(start_paused = true)]
async fn stop_on_requires_action_hands_control_back() {
    let source = ScriptedSource::new().with_statuses("run_1", &["queued", "requires_action", "completed"]);
    let policy = every_second().stop_on_requires_action();

    let run = wait_until_terminal(&source, "run_1", &policy, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(run.status, RunStatus::RequiresAction);
    assert_eq!(source.fetches(), 2);
}

#[tokio::test(start_paused = true)]
async fn cancelling_is_returned_unless_policy_waits_through_it() {
    let statuses = ["in_progress", "cancelling", "cancelled"];

    let source = ScriptedSource::new().with_statuses("run_1", &statuses);
    let run = wait_until_terminal(&source, "run_1", &every_second(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(run.status, RunStatus::Cancelling);

    let source = ScriptedSource::new().with_statuses("run_1", &statuses);
    let policy = every_second().wait_through_cancelling();
    let run = wait_until_terminal(&source, "run_1", &policy, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(run.status, RunStatus::Cancelled);
    assert_eq!(source.fetches(), 3);
}

#[tokio::test(start_paused = true)]
async fn unknown_status_keeps_polling_unless_declared_terminal() {
    let statuses = ["queued", "paused_for_review", "completed"];

    let source = ScriptedSource::new().with_statuses("run_1", &statuses);
    let run = wait_until_terminal(&source, "run_1", &every_second(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(source.fetches(), 3);

    let source = ScriptedSource::new().with_statuses("run_1", &statuses);
    let policy = every_second().treat_unknown_as_terminal("paused_for_review");
    let run = wait_until_terminal(&source, "run_1", &policy, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(run.status, RunStatus::Unknown("paused_for_review".to_string()));
    assert_eq!(source.fetches(), 2);
}

#[tokio::test(start_paused = true)]
async fn rejects_empty_run_id_and_zero_interval_before_fetching() {
    let source = ScriptedSource::new().with_statuses("run_1", &["completed"]);
    let cancel = CancellationToken::new();

    let err = wait_until_terminal(&source, "  ", &every_second(), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, PollError::InvalidArgument(_)));

    let policy = PollPolicy::default().with_poll_interval(Duration::ZERO);
    let err = wait_until_terminal(&source, "run_1", &policy, &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, PollError::InvalidArgument(_)));

    assert_eq!(source.fetches(), 0);
}

#[tokio::test(start_paused = true)]
async fn retrying_source_absorbs_transient_failures() {
    let source = RetryingSource::new(
        ScriptedSource::new().with_script(
            "run_1",
            vec![
                Step::TransportError(503),
                Step::TransportError(502),
                Step::status("completed"),
            ],
        ),
        RetryPolicy {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_millis(200),
            multiplier: 2.0,
        },
    );

    let run = wait_until_terminal(&source, "run_1", &every_second(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(source.inner().fetches(), 3);
}

#[tokio::test(start_paused = true)]
async fn retrying_source_does_not_retry_authentication_failures() {
    let source = RetryingSource::new(
        ScriptedSource::new().with_script("run_1", vec![Step::TransportError(401)]),
        RetryPolicy::default(),
    );

    let err = wait_until_terminal(&source, "run_1", &every_second(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err.transport_error(),
        Some(AgentsError::Api { status: 401, .. })
    ));
    assert_eq!(source.inner().fetches(), 1);
}
