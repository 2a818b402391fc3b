//! Jira ticket URL validation.

use crate::failure::{names, Failure};
use std::fmt;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketUrlError {
    #[error("Please enter a valid URL")]
    Malformed(#[from] url::ParseError),
    #[error("Please enter a valid URL (unsupported scheme `{0}`)")]
    UnsupportedScheme(String),
    #[error("Please enter a valid Jira ticket URL")]
    NotATicket,
}

impl From<TicketUrlError> for Failure {
    fn from(e: TicketUrlError) -> Self {
        Failure::exception(names::VALIDATION, e.to_string())
    }
}

/// A validated ticket reference, e.g. `PROJ-123` on some Jira host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRef {
    pub url: Url,
    pub project: String,
    pub number: u64,
}

impl TicketRef {
    pub fn key(&self) -> String {
        format!("{}-{}", self.project, self.number)
    }
}

impl fmt::Display for TicketRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.project, self.number)
    }
}

/// Parse `http(s)://host/.../browse/KEY-N` (or `/projects/KEY-N`).
pub fn parse_ticket_url(input: &str) -> Result<TicketRef, TicketUrlError> {
    let url = Url::parse(input.trim())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TicketUrlError::UnsupportedScheme(url.scheme().to_string()));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(TicketUrlError::NotATicket);
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.collect())
        .unwrap_or_default();
    let (project, number) = segments
        .windows(2)
        .filter(|w| matches!(w[0], "browse" | "projects"))
        .find_map(|w| split_key(w[1]))
        .map(|(p, n)| (p.to_string(), n))
        .ok_or(TicketUrlError::NotATicket)?;

    Ok(TicketRef {
        url,
        project,
        number,
    })
}

/// `PROJ-123` -> (`PROJ`, 123). Project keys are uppercase ASCII letters.
fn split_key(segment: &str) -> Option<(&str, u64)> {
    let (project, number) = segment.split_once('-')?;
    if project.is_empty() || !project.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((project, number.parse().ok()?))
}
