//! CLI for the ticketflow workflow runner.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use ticketflow_core::config::TicketflowConfig;
use ticketflow_core::handler::ErrorHandler;

use commands::{run_classify, run_completions, run_man, run_show_config, run_validate, run_workflow};

/// Top-level CLI for ticketflow.
#[derive(Debug, Parser)]
#[command(name = "ticketflow")]
#[command(about = "ticketflow: Jira ticket to pull request workflow runner", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run the (simulated) workflow for a Jira ticket URL.
    Run {
        /// Ticket URL, e.g. https://acme.atlassian.net/browse/PROJ-123.
        url: String,
        /// Seed for the simulated backends, for reproducible runs.
        #[arg(long, value_name = "N")]
        seed: Option<u64>,
        /// Accept every offered retry of a failed step.
        #[arg(long)]
        auto_retry: bool,
    },

    /// Classify a failure given as JSON (or plain text) and show the record.
    Classify {
        /// Failure payload, e.g. '{"response":{"status":429}}' or 'boom'.
        failure: String,
        /// Where the failure happened.
        #[arg(long)]
        context: Option<String>,
        /// Print the full record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Check that a string is a valid Jira ticket URL.
    Validate {
        /// Ticket URL to check.
        url: String,
    },

    /// Show the config file path and effective configuration.
    Config,

    /// Print shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },

    /// Print the man page (roff).
    Man,
}

impl CliCommand {
    pub async fn run_from_args(cfg: Result<TicketflowConfig>) -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Completions { shell } => return run_completions(shell),
            CliCommand::Man => return run_man(),
            _ => {}
        }

        let cfg = cfg?;
        tracing::debug!("loaded config: {:?}", cfg);
        let handler = ErrorHandler::new(&cfg.handler);

        match cli.command {
            CliCommand::Run {
                url,
                seed,
                auto_retry,
            } => run_workflow(&handler, &cfg, &url, seed, auto_retry).await?,
            CliCommand::Classify {
                failure,
                context,
                json,
            } => run_classify(&handler, &failure, context.as_deref(), json)?,
            CliCommand::Validate { url } => run_validate(&handler, &url)?,
            CliCommand::Config => run_show_config(&cfg)?,
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
