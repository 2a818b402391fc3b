//! Integration test: retry executor, timeout racing and classification used
//! together through the public API, the way the CLI drives them.

mod common;

use common::flaky::Flaky;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use ticketflow_core::config::{HandlerConfig, WorkflowConfig};
use ticketflow_core::ticket::parse_ticket_url;
use ticketflow_core::workflow::{SimulatedRunner, StepStatus, Workflow, WorkflowOutcome};
use ticketflow_core::{
    classify, execute_with_retry, execute_with_retry_observed, with_timeout, ErrorCode,
    ErrorHandler, Failure, RetryPolicy,
};
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn rate_limited_call_recovers_within_policy() {
    let op = Flaky::new(2, Failure::from_json(json!({ "response": { "status": 429 } })));
    let seen = Mutex::new(Vec::new());
    let policy = RetryPolicy::new(3, Duration::from_millis(1000));

    let v = execute_with_retry_observed(&policy, || op.call(), |attempt, e| {
        seen.lock().unwrap().push((attempt, classify(e, None).code));
    })
    .await
    .unwrap();

    assert_eq!(v, "ok");
    assert_eq!(op.calls(), 3);
    assert_eq!(
        *seen.lock().unwrap(),
        [(1, ErrorCode::RateLimitError), (2, ErrorCode::RateLimitError)]
    );
}

#[tokio::test(start_paused = true)]
async fn terminal_failure_is_returned_unwrapped_then_classified() {
    let failure = Failure::from_json(json!({ "response": { "status": 404, "data": { "errorMessages": ["gone"] } } }));
    let op = Flaky::new(u32::MAX, failure.clone());
    let policy = RetryPolicy::new(2, Duration::from_millis(5));

    let err = execute_with_retry(&policy, || op.call()).await.unwrap_err();
    assert_eq!(err, failure);
    assert_eq!(op.calls(), 2);

    let record = classify(&err, Some("Fetch Ticket"));
    assert_eq!(record.code, ErrorCode::ApiError);
    assert!(!record.retryable);
    assert_eq!(record.details.unwrap()["data"]["errorMessages"][0], "gone");
}

#[tokio::test]
async fn single_attempt_text_failure() {
    let err = execute_with_retry(&RetryPolicy::new(1, Duration::ZERO), || async {
        Err::<(), _>("boom")
    })
    .await
    .unwrap_err();
    assert_eq!(err, "boom");
    let record = classify(&Failure::from(err), None);
    assert_eq!(record.code, ErrorCode::UnknownError);
    assert_eq!(record.message, "boom");
}

#[tokio::test(start_paused = true)]
async fn timeout_inside_retry_is_retried_then_reported() {
    let handler_seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&handler_seen);
    let handler = ErrorHandler::new(&HandlerConfig::default())
        .with_observer(move |r| sink.lock().unwrap().push(r.code));
    let start = Instant::now();

    let err = handler
        .handle_async("slow upstream", &RetryPolicy::new(2, Duration::from_millis(100)), || {
            with_timeout(Duration::from_millis(50), async {
                std::future::pending::<Result<(), Failure>>().await
            })
        })
        .await
        .unwrap_err();

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(200) && elapsed < Duration::from_millis(220));
    assert_eq!(err.code, ErrorCode::TimeoutError);
    assert!(err.is_recoverable());
    assert_eq!(*handler_seen.lock().unwrap(), [ErrorCode::TimeoutError]);
}

#[tokio::test(start_paused = true)]
async fn simulated_workflow_without_faults_completes() {
    let cfg = WorkflowConfig {
        failure_rates: vec![0.0; 6],
        step_latency_ms: [1, 3],
        ..WorkflowConfig::default()
    };
    let handler = ErrorHandler::new(&HandlerConfig::default());
    let ticket = parse_ticket_url("https://acme.atlassian.net/browse/DEMO-1").unwrap();
    let mut wf = Workflow::new(&handler, SimulatedRunner::new(&cfg, Some(42)), RetryPolicy::default(), &cfg);

    assert_eq!(wf.run(&ticket).await, WorkflowOutcome::Completed);
    assert!(wf.steps().iter().all(|s| s.status == StepStatus::Completed));
}

#[tokio::test(start_paused = true)]
async fn simulated_workflow_with_certain_faults_stops_at_first_step() {
    let cfg = WorkflowConfig {
        failure_rates: vec![1.0; 6],
        step_latency_ms: [1, 1],
        ..WorkflowConfig::default()
    };
    let handler = ErrorHandler::new(&HandlerConfig::default());
    let ticket = parse_ticket_url("https://acme.atlassian.net/browse/DEMO-1").unwrap();
    let policy = RetryPolicy::new(2, Duration::from_millis(1));
    let mut wf = Workflow::new(&handler, SimulatedRunner::new(&cfg, Some(3)), policy, &cfg);

    let WorkflowOutcome::Failed(failure) = wf.run(&ticket).await else {
        panic!("expected failure");
    };
    assert_eq!(failure.step.title(), "Fetch & Parse");
    assert_eq!(wf.steps()[1].status, StepStatus::Pending);
}
