//! Error types for the transcoder control layer.

use thiserror::Error;

/// Main error type for the control layer.
#[derive(Error, Debug)]
pub enum Error {
    /// Format negotiation was rejected (incompatible formats or the codec
    /// capability refused the pair). No partial state is retained.
    #[error("Negotiation rejected: {0}")]
    NegotiationRejected(String),

    /// No concrete codec capability is bound for conversion.
    ///
    /// The default [`crate::CodecCapability::convert`] always fails with
    /// this; its presence at runtime is a composition error, not a
    /// recoverable condition.
    #[error("Conversion unavailable: no codec capability bound")]
    ConversionUnavailable,

    /// Unsupported feature or format.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Invalid parameter provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a negotiation rejection error.
    pub fn negotiation_rejected(msg: impl Into<String>) -> Self {
        Error::NegotiationRejected(msg.into())
    }

    /// Create an unsupported error.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Error::Unsupported(msg.into())
    }

    /// Create an invalid parameter error.
    pub fn invalid_param(msg: impl Into<String>) -> Self {
        Error::InvalidParameter(msg.into())
    }

    /// Check if this is a negotiation rejection.
    #[must_use]
    pub fn is_negotiation_rejected(&self) -> bool {
        matches!(self, Error::NegotiationRejected(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::negotiation_rejected("pixel formats differ");
        assert_eq!(err.to_string(), "Negotiation rejected: pixel formats differ");
    }

    #[test]
    fn test_is_negotiation_rejected() {
        assert!(Error::negotiation_rejected("x").is_negotiation_rejected());
        assert!(!Error::ConversionUnavailable.is_negotiation_rejected());
    }
}
