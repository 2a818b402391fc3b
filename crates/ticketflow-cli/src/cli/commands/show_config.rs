//! `ticketflow config` – show where config lives and what is in effect.

use anyhow::Result;
use ticketflow_core::config::{self, TicketflowConfig};

pub fn run_show_config(cfg: &TicketflowConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", config::to_toml(cfg)?);
    Ok(())
}
