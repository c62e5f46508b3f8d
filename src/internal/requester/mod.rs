pub mod error;
pub mod http_requester;
pub mod types;

// Re-export main types
pub use error::RequestError;
pub use http_requester::HttpRequester;
pub use types::{FormParams, HeaderSet, HttpResponse, FORM_CONTENT_TYPE, JSON_CONTENT_TYPE};
