pub mod driver;
pub mod error;
pub mod types;

pub use driver::{Driver, Encoding, LoginOutcome};
pub use error::LoginError;
pub use types::{LoginData, ResponseEnvelope};
