//! User-facing failure messages

use pid_application::SessionError;

/// Shown when the analysis fails without a more specific cause
pub const ANALYSIS_FAILED: &str =
    "Failed to analyze the diagram. Please check your API Key and try again.";

/// Shown in place of an answer when a follow-up fails
pub const FOLLOW_UP_FAILED: &str =
    "Sorry, I encountered an error trying to answer that. Please try again.";

/// Banner text for a failed `begin_analysis`.
///
/// Credential problems get the API key hint; anything else shows the cause.
pub fn analysis_failure(error: &SessionError) -> String {
    match error.gateway_error() {
        Some(cause) if !cause.is_configuration() => {
            let message = cause.to_string();
            if message.trim().is_empty() {
                ANALYSIS_FAILED.to_string()
            } else {
                message
            }
        }
        _ => ANALYSIS_FAILED.to_string(),
    }
}
