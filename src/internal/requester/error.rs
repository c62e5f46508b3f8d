/// Failures of a single form or JSON request.
///
/// Construction failures (`EmptyUrl`, `RequestConstruction`, `PayloadEncoding`)
/// are raised before anything touches the network.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("empty URL")]
    EmptyUrl,
    #[error("request construction error: {0}")]
    RequestConstruction(String),
    #[error("payload encoding error: {0}")]
    PayloadEncoding(String),
    #[error("request execution error: {0}")]
    RequestExecution(#[source] reqwest::Error),
    #[error("response read error: {0}")]
    ResponseRead(#[source] reqwest::Error),
}

impl RequestError {
    /// Whether the request or body read hit the configured timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            RequestError::RequestExecution(e) | RequestError::ResponseRead(e) => e.is_timeout(),
            _ => false,
        }
    }
}
