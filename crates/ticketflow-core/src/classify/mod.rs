//! Error classification: map any [`Failure`] to exactly one [`ErrorRecord`].
//!
//! Rules live in an ordered table ([`RULES`]) and the first match wins, so
//! each rule can be inspected and tested on its own.

mod fallback;
pub mod messages;
mod rules;

pub use messages::user_message_for;
pub use rules::{Rule, Verdict, GENERIC_MESSAGE, RULES};

use crate::failure::Failure;
use crate::record::ErrorRecord;

/// The rule that decides `failure`.
pub fn matching_rule(failure: &Failure) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| (rule.applies)(failure))
        .unwrap_or(&RULES[RULES.len() - 1])
}

/// Classify a failure. Never fails; unrecognized input becomes `UNKNOWN_ERROR`.
pub fn classify(failure: &Failure, context: Option<&str>) -> ErrorRecord {
    let rule = matching_rule(failure);
    let verdict = (rule.verdict)(failure);
    tracing::trace!(rule = rule.name, code = %verdict.code, "classified failure");
    ErrorRecord::new(
        verdict.code,
        verdict.message,
        verdict.severity,
        verdict.retryable,
    )
    .with_context(context)
    .with_details(failure.details())
}

/// Worth offering a user-initiated retry for `record`.
pub fn is_recoverable(record: &ErrorRecord) -> bool {
    record.is_recoverable()
}
