//! Error taxonomy shared by the storefront components.
//!
//! Validation failures stay inside the submission coordinator, submission
//! failures become user-visible notifications, and anything else is caught at
//! the top level and reported as [`RuntimeError::FeaturesUnavailable`].

/// A single field that failed validation. Recoverable and surfaced inline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

/// A failed submission attempt. Always retryable by submitting again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    /// The transport completed but reported that nothing was delivered.
    #[error("submission was not accepted")]
    Rejected,

    /// The transport itself failed.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Errors caught at the outermost boundary.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("Website features temporarily unavailable")]
    FeaturesUnavailable(#[source] anyhow::Error),
}

impl RuntimeError {
    /// Wrap any unexpected failure as the generic top-level notice.
    pub fn unavailable(err: impl Into<anyhow::Error>) -> Self {
        RuntimeError::FeaturesUnavailable(err.into())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_field() {
        let err = ValidationError {
            field: "email".to_string(),
            message: "Please enter a valid email address".to_string(),
        };
        assert_eq!(err.to_string(), "email: Please enter a valid email address");
    }

    #[test]
    fn runtime_error_shows_generic_notice() {
        let err = RuntimeError::unavailable(anyhow::anyhow!("catalog missing"));
        assert_eq!(err.to_string(), "Website features temporarily unavailable");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn service_error_wraps_anyhow() {
        let err: ServiceError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}
