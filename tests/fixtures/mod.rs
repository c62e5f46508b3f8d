//! Test fixtures for requester and driver testing
#![allow(dead_code)]

pub mod payloads;
pub mod servers;

use login_requester::internal::config::AppConfig;

/// Config pointing at `url`, never pausing for stdin
pub fn test_config(url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.target.url = url.to_string();
    config.target.timeout = "5s".to_string();
    config.driver.pause_on_exit = false;
    config
}
