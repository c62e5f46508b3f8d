pub mod config;
pub mod logger;
pub mod login;
pub mod requester;
pub mod server;
pub mod transport;
