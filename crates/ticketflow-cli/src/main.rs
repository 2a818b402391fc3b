use ticketflow_core::{config, logging};

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Config first so logging can honor `[logging]`; a broken config is
    // reported by the command itself.
    let cfg = config::load_or_init();
    let log_cfg = cfg.as_ref().map(|c| c.logging.clone()).unwrap_or_default();
    if let Err(err) = logging::init_logging(&log_cfg) {
        logging::init_logging_stderr(&log_cfg);
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args(cfg).await {
        eprintln!("ticketflow error: {:#}", err);
        std::process::exit(1);
    }
}
