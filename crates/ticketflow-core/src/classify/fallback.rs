//! Severity guess for failures no rule recognized.

use crate::taxonomy::Severity;

/// Exception names that indicate a programming defect rather than an
/// environmental failure.
const DEFECT_NAMES: [&str; 2] = ["ReferenceError", "TypeError"];

/// Severity for an unrecognized named exception.
pub(super) fn severity_for(name: &str, message: &str) -> Severity {
    let text = message.to_lowercase();
    let networky = mentions_network(&text);

    if DEFECT_NAMES.contains(&name) && !networky {
        return Severity::Critical;
    }
    if networky || mentions_any(&text, AUTH_INDICATORS) {
        return Severity::High;
    }
    if mentions_any(&text, &["validation", "invalid", "api", "timeout", "timed out"]) {
        return Severity::Medium;
    }
    Severity::Low
}

const AUTH_INDICATORS: &[&str] = &[
    "unauthorized",
    "auth",
    "permission",
    "forbidden",
    "denied",
    "access denied",
];

/// Needles this short only count as whole words ("api" must not hit "rapid").
const SHORT_NEEDLE: usize = 3;

pub(super) fn mentions_network(lowercase: &str) -> bool {
    mentions_any(lowercase, &["network", "fetch"])
}

pub(super) fn mentions_timeout(lowercase: &str) -> bool {
    mentions_any(lowercase, &["timeout", "timedout", "timed out"])
}

/// Whether any needle occurs in `text`. Both sides are expected lowercase.
pub(super) fn mentions_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| {
        if needle.len() <= SHORT_NEEDLE {
            text.split(|c: char| !c.is_ascii_alphanumeric())
                .any(|word| word == *needle)
        } else {
            text.contains(needle)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defects_are_critical() {
        assert_eq!(severity_for("TypeError", "x is undefined"), Severity::Critical);
        assert_eq!(
            severity_for("ReferenceError", "foo is not defined"),
            Severity::Critical
        );
    }

    #[test]
    fn defect_during_network_operation_is_high() {
        assert_eq!(
            severity_for("TypeError", "NetworkError when attempting to fetch resource"),
            Severity::High
        );
    }

    #[test]
    fn text_driven_levels() {
        assert_eq!(severity_for("Error", "Git repository access denied: permission"), Severity::High);
        assert_eq!(severity_for("Error", "Jira API rate limit exceeded"), Severity::Medium);
        assert_eq!(severity_for("Error", "Code generation service unavailable"), Severity::Low);
    }

    #[test]
    fn authorization_wording_is_high() {
        assert_eq!(severity_for("Error", "Authorization failed for this resource"), Severity::High);
        assert_eq!(severity_for("Error", "Git repository access denied"), Severity::High);
        assert_eq!(severity_for("Error", "Request denied by upstream"), Severity::High);
        assert_eq!(severity_for("Error", "Ticket not found or access denied"), Severity::High);
    }

    #[test]
    fn long_needles_match_inside_words() {
        assert!(mentions_timeout("connect etimedout 10.0.0.1:443"));
        assert!(mentions_timeout("too many timeouts talking to upstream"));
        assert!(mentions_network("networkerror: connection lost"));
        assert!(mentions_any("reauthorization required", AUTH_INDICATORS));
    }

    #[test]
    fn short_needles_need_word_boundaries() {
        assert!(!mentions_any("rapid capital growth", &["api"]));
        assert!(mentions_any("the api is down", &["api"]));
        assert!(mentions_any("jira api: rate limit", &["api"]));
    }
}
