use thiserror::Error;

/// Errors surfaced by the exchange pipeline.
///
/// The engine recovers from every error it meets during an exchange and
/// renders it in place as a failure outcome, so these variants mostly travel
/// across the transport seam rather than out of the public API.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The underlying transport could not complete the request
    /// (connection refused, DNS failure, protocol error, etc.).
    ///
    /// Displays as the bare underlying message; the engine renders it in
    /// place as `Error: {message}`.
    #[error("{0}")]
    Transport(String),

    /// A response declared a JSON content type but its body did not parse.
    #[error("{0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Result alias for exchange operations
pub type Result<T> = std::result::Result<T, ExchangeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_displays_raw_message() {
        let err = ExchangeError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn test_invalid_json_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();
        let err: ExchangeError = parse_err.into();
        assert!(matches!(err, ExchangeError::InvalidJson(_)));
        assert!(!err.to_string().is_empty());
    }
}
