//! Error types for the gateway crate

use crate::config::ConfigError;
use hermes_ports::ValidationFailure;
use thiserror::Error;

/// Transport-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Channel closed")]
    ChannelClosed,
}

/// Gateway-level errors (connector operations)
///
/// Connectors map their wire and protocol failures onto these variants; the
/// gateway layer itself never retries or swallows them.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid mode for operation: {0}")]
    InvalidMode(String),

    #[error("Broker error: {0}")]
    Exchange(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Every failure the gate logged for the rejected batch
    #[error("Orders rejected by validation: {} failure(s)", .0.len())]
    ValidationRejected(Vec<ValidationFailure>),
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::Serialization(e.to_string())
    }
}

/// Result of a gateway operation
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_rejected_reports_failure_count() {
        let error = GatewayError::ValidationRejected(vec![
            ValidationFailure::new("price", "No price"),
            ValidationFailure::new("instrument", "No instrument"),
        ]);
        assert_eq!(error.to_string(), "Orders rejected by validation: 2 failure(s)");
    }

    #[test]
    fn test_transport_errors_convert() {
        let error: GatewayError = TransportError::ChannelClosed.into();
        assert!(matches!(error, GatewayError::Transport(TransportError::ChannelClosed)));
    }
}
