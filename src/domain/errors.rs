//! Domain errors for the issuebrief system.

use thiserror::Error;

/// Application-level errors surfaced by the gateways and services.
///
/// The taxonomy mirrors the three remote failure classes the tool can
/// encounter: failing to reach an API at all, reaching the tracker API
/// but getting a response we cannot use, and failing to obtain a usable
/// completion. Local input problems use [`AppError::Validation`].
#[derive(Debug, Error)]
pub enum AppError {
    /// Network or auth failure reaching either remote API.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Malformed or unexpected response shape from the tracker API.
    ///
    /// Carries the attempted query text so the full request can be
    /// logged server-side for debugging. The `Display` form stays
    /// concise; use [`AppError::query_text`] for the diagnostic detail.
    #[error("Protocol error: {message}")]
    Protocol {
        /// Human-readable description of what was wrong.
        message: String,
        /// The GraphQL document and serialized variables that failed.
        query: String,
    },

    /// Completion request failure or an empty/unparseable response.
    #[error("Summary generation failed: {0}")]
    Generation(String),

    /// Invalid local input or state, before any remote call is made.
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl AppError {
    /// The attempted query text, when this error carries one.
    pub fn query_text(&self) -> Option<&str> {
        match self {
            Self::Protocol { query, .. } => Some(query),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_display_is_concise() {
        let err = AppError::Protocol {
            message: "missing field `teams`".to_string(),
            query: "query { teams { nodes { id } } }".to_string(),
        };
        let shown = err.to_string();
        assert!(shown.contains("missing field `teams`"));
        assert!(!shown.contains("nodes"));
    }

    #[test]
    fn query_text_only_on_protocol() {
        let err = AppError::Transport("connection refused".to_string());
        assert!(err.query_text().is_none());

        let err = AppError::Protocol {
            message: "bad".to_string(),
            query: "query { viewer { id } }".to_string(),
        };
        assert_eq!(err.query_text(), Some("query { viewer { id } }"));
    }
}
