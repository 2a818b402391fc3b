//! Step execution seam and the simulated implementation.

use super::step::StepId;
use crate::config::WorkflowConfig;
use crate::failure::Failure;
use crate::ticket::TicketRef;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

/// Executes a single workflow step.
pub trait StepRunner {
    fn run_step(
        &self,
        step: StepId,
        ticket: &TicketRef,
    ) -> impl Future<Output = Result<String, Failure>> + Send;
}

/// Failure probability for steps with no configured rate.
const DEFAULT_FAILURE_RATE: f64 = 0.1;

const INJECTED_FAILURES: [&str; 6] = [
    "Network timeout occurred",
    "Jira API rate limit exceeded",
    "Invalid authentication credentials",
    "Ticket not found or access denied",
    "Code generation service unavailable",
    "Git repository access denied",
];

/// Stand-in for the real Jira/codegen/Git backends: sleeps a random latency
/// and fails with the configured per-step probability.
pub struct SimulatedRunner {
    latency_ms: (u64, u64),
    failure_rates: Vec<f64>,
    rng: Mutex<StdRng>,
}

/// What one simulated attempt will do, decided before sleeping.
enum Plan {
    Succeed(Duration),
    Fail(Duration, &'static str),
}

impl SimulatedRunner {
    pub fn new(cfg: &WorkflowConfig, seed: Option<u64>) -> Self {
        let [a, b] = cfg.step_latency_ms;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            latency_ms: (a.min(b), a.max(b)),
            failure_rates: cfg.failure_rates.clone(),
            rng: Mutex::new(rng),
        }
    }

    fn failure_rate(&self, step: StepId) -> f64 {
        let rate = self
            .failure_rates
            .get(step.index())
            .copied()
            .unwrap_or(DEFAULT_FAILURE_RATE);
        if rate.is_nan() {
            DEFAULT_FAILURE_RATE
        } else {
            rate.clamp(0.0, 1.0)
        }
    }

    fn plan(&self, step: StepId) -> Plan {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let latency = Duration::from_millis(rng.gen_range(self.latency_ms.0..=self.latency_ms.1));
        if rng.gen_bool(self.failure_rate(step)) {
            let message = INJECTED_FAILURES
                .choose(&mut *rng)
                .copied()
                .unwrap_or(INJECTED_FAILURES[0]);
            Plan::Fail(latency, message)
        } else {
            Plan::Succeed(latency)
        }
    }
}

impl StepRunner for SimulatedRunner {
    fn run_step(
        &self,
        step: StepId,
        ticket: &TicketRef,
    ) -> impl Future<Output = Result<String, Failure>> + Send {
        let plan = self.plan(step);
        let key = ticket.key();
        async move {
            match plan {
                Plan::Succeed(latency) => {
                    tokio::time::sleep(latency).await;
                    tracing::debug!(step = step.title(), ticket = %key, "simulated step succeeded");
                    Ok(format!("{} completed successfully", step.title()))
                }
                Plan::Fail(latency, message) => {
                    tokio::time::sleep(latency).await;
                    Err(Failure::error(message))
                }
            }
        }
    }
}
