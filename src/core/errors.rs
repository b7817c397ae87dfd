//! Error types for the scoring pipeline.
//!
//! The taxonomy follows the run semantics: configuration and sink errors
//! are fatal and abort the run, provider errors are recovered per wallet
//! at the extraction boundary and never propagate past it.

use thiserror::Error;

/// Errors surfaced by the wallet scoring pipeline.
#[derive(Debug, Error)]
pub enum ScorerError {
    /// Invalid or incomplete configuration. Detected before any wallet
    /// is processed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A history fetch for one wallet failed. The wallet degrades to the
    /// sentinel feature record and the run continues.
    #[error("Provider error for {wallet}: {message}")]
    Provider { wallet: String, message: String },

    /// Writing the final deliverable failed.
    #[error("Sink error: {0}")]
    Sink(#[from] std::io::Error),
}

/// Result type for scoring operations.
pub type Result<T> = std::result::Result<T, ScorerError>;

impl ScorerError {
    /// Whether the run can continue after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Provider { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScorerError::Config("wallet list is empty".to_string());
        assert_eq!(err.to_string(), "Configuration error: wallet list is empty");

        let err = ScorerError::Provider {
            wallet: "0xabc".to_string(),
            message: "timeout".to_string(),
        };
        assert_eq!(err.to_string(), "Provider error for 0xabc: timeout");
    }

    #[test]
    fn test_error_is_recoverable() {
        let recoverable = ScorerError::Provider {
            wallet: "0xabc".to_string(),
            message: "connection reset".to_string(),
        };
        assert!(recoverable.is_recoverable());

        let fatal = ScorerError::Config("bad weights".to_string());
        assert!(!fatal.is_recoverable());
    }
}
