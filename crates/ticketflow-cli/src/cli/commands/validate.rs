//! `ticketflow validate <url>` – check a ticket URL.

use anyhow::{bail, Result};
use ticketflow_core::handler::ErrorHandler;
use ticketflow_core::ticket::parse_ticket_url;

pub fn run_validate(handler: &ErrorHandler, url: &str) -> Result<()> {
    match parse_ticket_url(url) {
        Ok(ticket) => {
            println!("{}", ticket);
            Ok(())
        }
        Err(e) => {
            let record = handler.handle(&e.into(), "Jira URL validation");
            bail!("{}", handler.user_message(&record))
        }
    }
}
