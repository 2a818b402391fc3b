//! `ticketflow classify <failure>` – classify a failure payload.

use anyhow::Result;
use ticketflow_core::failure::Failure;
use ticketflow_core::handler::ErrorHandler;

/// JSON payloads go through the JSON boundary; anything else is bare text.
fn parse_failure(input: &str) -> Failure {
    match serde_json::from_str::<serde_json::Value>(input) {
        Ok(value) => Failure::from_json(value),
        Err(_) => Failure::Text(input.to_string()),
    }
}

pub fn run_classify(handler: &ErrorHandler, input: &str, context: Option<&str>, json: bool) -> Result<()> {
    let failure = parse_failure(input);
    let record = handler.handle(&failure, context.unwrap_or("cli"));
    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }
    println!("code:        {}", record.code);
    println!("severity:    {}", record.severity);
    println!("retryable:   {}", handler.is_retryable(&record));
    println!("recoverable: {}", handler.is_recoverable(&record));
    println!("message:     {}", record.message);
    println!("user:        {}", handler.user_message(&record));
    Ok(())
}
