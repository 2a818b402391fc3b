//! End-user phrases keyed by error code.

use crate::taxonomy::ErrorCode;

/// Phrase shown to end users for `code`, if the code has one.
pub fn user_message_for(code: ErrorCode) -> Option<&'static str> {
    match code {
        ErrorCode::NetworkError => Some("Please check your internet connection and try again."),
        ErrorCode::AuthenticationError => Some("Please authenticate with Jira again."),
        ErrorCode::TokenExpired => Some("Your session has expired. Please log in again."),
        ErrorCode::RateLimitError => {
            Some("Too many requests. Please wait a moment before trying again.")
        }
        ErrorCode::PermissionDenied => {
            Some("You don't have permission to access this Jira ticket.")
        }
        ErrorCode::TimeoutError => Some("The request timed out. Please try again."),
        ErrorCode::ValidationError | ErrorCode::ApiError | ErrorCode::UnknownError => None,
    }
}
