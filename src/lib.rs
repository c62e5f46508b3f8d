pub mod cli;
pub mod internal;

// Re-export commonly used types
pub use internal::config::config;
pub use internal::login::{Driver, LoginError, ResponseEnvelope};
pub use internal::requester::{HttpRequester, RequestError};
