pub mod handler;
#[allow(clippy::module_inception)]
pub mod server;

// Re-export main types
pub use handler::{Handler, InspectedRequest, MockUser};
pub use server::MockServer;
