use infocomic_core::reel::ReelError;

/// Errors from the generation service client.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-2xx status or an `{error}` body.
    #[error("Generation service error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The service's error text, or the raw body when it had none.
        message: String,
    },

    /// The service answered successfully but the payload is unusable.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<GatewayError> for ReelError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Request(e) => ReelError::Network(e.to_string()),
            GatewayError::Api { message, .. } => ReelError::Generation(message),
            GatewayError::Malformed(msg) => ReelError::Generation(msg),
        }
    }
}
