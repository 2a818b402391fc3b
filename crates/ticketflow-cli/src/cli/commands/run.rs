//! `ticketflow run <url>` – drive the simulated workflow for a ticket.

use anyhow::{bail, Result};
use ticketflow_core::config::TicketflowConfig;
use ticketflow_core::handler::ErrorHandler;
use ticketflow_core::ticket::parse_ticket_url;
use ticketflow_core::workflow::{SimulatedRunner, StepFailure, StepState, Workflow, WorkflowOutcome};

fn print_steps(steps: &[StepState]) {
    println!("  {:<4} {:<22} {:<10}", "#", "STEP", "STATUS");
    for (i, s) in steps.iter().enumerate() {
        println!(
            "  {:<4} {:<22} {:<10}",
            i + 1,
            s.id.title(),
            format!("{:?}", s.status).to_lowercase()
        );
    }
}

fn print_failure(f: &StepFailure) {
    println!("{} failed: {}", f.step.title(), f.record.user_message);
    if f.retry_available {
        println!("This error might be temporary. You can retry this step. (Attempt {})", f.user_retries);
    } else if f.record.is_recoverable() {
        println!("Multiple attempts have failed. Please check your configuration or try again later.");
    }
}

pub async fn run_workflow(
    handler: &ErrorHandler,
    cfg: &TicketflowConfig,
    url: &str,
    seed: Option<u64>,
    auto_retry: bool,
) -> Result<()> {
    let ticket = match parse_ticket_url(url) {
        Ok(t) => t,
        Err(e) => {
            let record = handler.handle(&e.into(), "Jira URL submission");
            bail!("{}", handler.user_message(&record));
        }
    };
    println!("Processing {} ({})", ticket, ticket.url);

    let runner = SimulatedRunner::new(&cfg.workflow, seed);
    let mut workflow = Workflow::new(handler, runner, cfg.retry.to_policy(), &cfg.workflow);

    let mut outcome = workflow.run(&ticket).await;
    loop {
        match &outcome {
            WorkflowOutcome::Completed => {
                print_steps(workflow.steps());
                println!("Workflow complete. Your code is ready for review.");
                return Ok(());
            }
            WorkflowOutcome::Failed(f) => {
                print_failure(f);
                if !(auto_retry && f.retry_available) {
                    print_steps(workflow.steps());
                    bail!("workflow stopped at step: {}", f.step.title());
                }
                tracing::info!(step = f.step.title(), "retrying step on request");
            }
        }
        outcome = workflow.retry_current_step(&ticket).await;
    }
}
