use async_trait::async_trait;

use crate::internal::requester::{HttpResponse, RequestError};

pub mod http;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use http::ReqwestTransport;
#[cfg(any(test, feature = "test-utils"))]
pub use mock::{MockTransport, RecordedRequest};

/// Executes fully built requests.
///
/// The requester builds and validates requests itself; a transport only sends
/// them and collects the reply, so construction errors never reach it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and read the whole response body
    async fn execute(&self, request: reqwest::Request) -> Result<HttpResponse, RequestError>;
}
