//! Simulated "ticket → code → tests → PR" workflow.
//!
//! Steps run in order through the [`ErrorHandler`]; the first step that still
//! fails after automatic retries stops the run. The caller then decides
//! whether to take the offered user retry ([`Workflow::retry_current_step`]).

mod runner;
mod step;

pub use runner::{SimulatedRunner, StepRunner};
pub use step::{StepId, StepState, StepStatus};

use crate::config::WorkflowConfig;
use crate::handler::ErrorHandler;
use crate::record::ErrorRecord;
use crate::retry::{with_timeout, RetryPolicy};
use crate::ticket::TicketRef;
use std::time::Duration;

/// Why a run stopped early.
#[derive(Debug, Clone, PartialEq)]
pub struct StepFailure {
    pub step: StepId,
    pub record: ErrorRecord,
    /// Failures in a row that offered a user retry, this one included.
    pub user_retries: u32,
    /// A user-initiated retry is worth offering.
    pub retry_available: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    Completed,
    Failed(StepFailure),
}

pub struct Workflow<'h, R> {
    handler: &'h ErrorHandler,
    runner: R,
    policy: RetryPolicy,
    step_timeout: Duration,
    user_retry_limit: u32,
    steps: Vec<StepState>,
    current: usize,
    user_retries: u32,
}

impl<'h, R: StepRunner> Workflow<'h, R> {
    pub fn new(handler: &'h ErrorHandler, runner: R, policy: RetryPolicy, cfg: &WorkflowConfig) -> Self {
        Self {
            handler,
            runner,
            policy,
            step_timeout: Duration::from_millis(cfg.step_timeout_ms),
            user_retry_limit: cfg.user_retry_limit,
            steps: StepId::ALL.into_iter().map(StepState::pending).collect(),
            current: 0,
            user_retries: 0,
        }
    }

    pub fn steps(&self) -> &[StepState] {
        &self.steps
    }

    /// Step the next run starts from; `None` once every step completed.
    pub fn current_step(&self) -> Option<StepId> {
        self.steps.get(self.current).map(|s| s.id)
    }

    /// Run from the current step to the end, stopping at the first failure.
    pub async fn run(&mut self, ticket: &TicketRef) -> WorkflowOutcome {
        while let Some(step) = self.current_step() {
            if let Err(failure) = self.process_step(step, ticket).await {
                return WorkflowOutcome::Failed(failure);
            }
            self.current += 1;
        }
        tracing::info!(ticket = %ticket, "workflow complete");
        WorkflowOutcome::Completed
    }

    /// Re-run the failed step and continue from there.
    pub async fn retry_current_step(&mut self, ticket: &TicketRef) -> WorkflowOutcome {
        self.run(ticket).await
    }

    /// Back to the first step with everything pending.
    pub fn reset(&mut self) {
        self.current = 0;
        self.user_retries = 0;
        for s in &mut self.steps {
            *s = StepState::pending(s.id);
        }
    }

    async fn process_step(&mut self, step: StepId, ticket: &TicketRef) -> Result<(), StepFailure> {
        let idx = step.index();
        self.steps[idx].status = StepStatus::Active;
        tracing::info!(step = step.title(), ticket = %ticket, "step started");

        let context = format!("Workflow step: {}", step.title());
        let result = {
            let runner = &self.runner;
            let limit = self.step_timeout;
            self.handler
                .handle_async(&context, &self.policy, || {
                    with_timeout(limit, runner.run_step(step, ticket))
                })
                .await
        };

        match result {
            Ok(output) => {
                self.steps[idx].status = StepStatus::Completed;
                self.steps[idx].output = Some(output);
                self.user_retries = 0;
                Ok(())
            }
            Err(record) => {
                self.steps[idx].status = StepStatus::Error;
                let recoverable = self.handler.is_recoverable(&record);
                if recoverable {
                    self.user_retries += 1;
                }
                Err(StepFailure {
                    step,
                    retry_available: recoverable && self.user_retries < self.user_retry_limit,
                    user_retries: self.user_retries,
                    record,
                })
            }
        }
    }
}
