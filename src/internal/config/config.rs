use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

// Version information from build environment - using option_env! for safety
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_URL: &str = "http://localhost:8080/user/login";
pub const DEFAULT_TIMEOUT: &str = "10s";

/// Console log layouts `init_logger` understands
pub const LOG_FORMATS: &[&str] = &["compact", "pretty"];

const ENV_PREFIX: &str = "LOGIN_REQUESTER";

/// Get version information
pub fn get_version_info() -> String {
    let git_describe = option_env!("VERGEN_GIT_DESCRIBE").unwrap_or("unknown");
    let build_date = option_env!("VERGEN_BUILD_DATE").unwrap_or("unknown");
    let rustc_semver = option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown");

    format!(
        "login-requester version {} ({})\n\
         Built: {}\n\
         Rust: {}",
        VERSION, git_describe, build_date, rustc_semver
    )
}

/// Which demonstration requests the driver issues
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DemoMode {
    #[serde(rename = "form")]
    Form,
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "both")]
    #[default]
    Both,
}

impl DemoMode {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.to_ascii_lowercase().as_str() {
            "form" => Ok(DemoMode::Form),
            "json" => Ok(DemoMode::Json),
            "both" => Ok(DemoMode::Both),
            other => Err(ConfigError::Message(format!(
                "unknown mode '{}', expected form|json|both",
                other
            ))),
        }
    }

    pub fn runs_form(self) -> bool {
        matches!(self, DemoMode::Form | DemoMode::Both)
    }

    pub fn runs_json(self) -> bool {
        matches!(self, DemoMode::Json | DemoMode::Both)
    }
}

/// The login endpoint and how to reach it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default = "default_timeout")]
    pub timeout: String,
    #[serde(default)]
    pub reuse_connections: bool,
    #[serde(default = "default_headers")]
    pub headers: HashMap<String, String>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            method: default_method(),
            timeout: default_timeout(),
            reuse_connections: false,
            headers: default_headers(),
        }
    }
}

impl TargetConfig {
    /// Request timeout, `None` when disabled
    pub fn timeout(&self) -> Result<Option<Duration>, ConfigError> {
        parse_timeout(&self.timeout)
    }
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}
fn default_method() -> String {
    "POST".to_string()
}
fn default_timeout() -> String {
    DEFAULT_TIMEOUT.to_string()
}

/// Browser-emulation headers sent with every demonstration request.
/// Content-Type is added per request by the driver.
pub fn default_headers() -> HashMap<String, String> {
    [
        ("Accept", "application/json, text/plain, */*"),
        ("Accept-Encoding", "gzip, deflate, br, zstd"),
        ("Accept-Language", "zh-CN,zh;q=0.9"),
        ("Connection", "keep-alive"),
        (
            "User-Agent",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36",
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default = "default_account")]
    pub account: String,
    #[serde(default = "default_password")]
    pub password: String,
    #[serde(default = "default_user_id")]
    pub user_id: i64,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            account: default_account(),
            password: default_password(),
            user_id: default_user_id(),
        }
    }
}

fn default_account() -> String {
    "snai".to_string()
}
fn default_password() -> String {
    "snai".to_string()
}
fn default_user_id() -> i64 {
    10000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    #[serde(default)]
    pub mode: DemoMode,
    #[serde(default = "default_true")]
    pub pause_on_exit: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            mode: DemoMode::default(),
            pause_on_exit: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub append_to_file: bool,
    #[serde(default)]
    pub disable_console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            color: true,
            output_path: None,
            append_to_file: false,
            disable_console: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "compact".to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub credentials: Credentials,
    #[serde(default)]
    pub driver: DriverConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the default locations and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(None)
    }

    /// Load configuration, layering `extra_file` above the default locations.
    /// An explicitly given file must exist.
    pub fn load_with(extra_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut config_builder = Config::builder()
            // Start with default values
            .set_default("target.url", DEFAULT_URL)?
            .set_default("target.method", "POST")?
            .set_default("target.timeout", DEFAULT_TIMEOUT)?
            .set_default("target.reuse_connections", false)?
            .set_default("credentials.account", "snai")?
            .set_default("credentials.password", "snai")?
            .set_default("credentials.user_id", 10000)?
            .set_default("driver.mode", "both")?
            .set_default("driver.pause_on_exit", true)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "compact")?
            .set_default("logging.color", true)?
            // Load config files in order of precedence
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("/etc/login-requester/config").required(false));

        if let Some(path) = extra_file {
            config_builder = config_builder.add_source(File::with_name(path).required(true));
        }

        let config = config_builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Reject values that would only fail later, mid-run
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.target.timeout()?;
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::Message(format!(
                "unknown log format '{}', expected {}",
                self.logging.format,
                LOG_FORMATS.join("|")
            )));
        }
        if self.target.method.trim().is_empty() {
            return Err(ConfigError::Message("target method is required".to_string()));
        }
        Ok(())
    }

    pub fn load_from_args(matches: &clap::ArgMatches) -> Result<Self, ConfigError> {
        let config_file = matches.get_one::<String>("config").map(|s| s.as_str());
        let mut config = Self::load_with(config_file)?;
        config.apply_args(matches)?;
        config.validate()?;
        Ok(config)
    }

    /// Override loaded values with CLI args if provided
    pub fn apply_args(&mut self, matches: &clap::ArgMatches) -> Result<(), ConfigError> {
        if let Some(url) = matches.get_one::<String>("url") {
            self.target.url = url.clone();
        }

        if let Some(timeout) = matches.get_one::<String>("timeout") {
            self.target.timeout = timeout.clone();
        }

        if let Some(account) = matches.get_one::<String>("account") {
            self.credentials.account = account.clone();
        }

        if let Some(password) = matches.get_one::<String>("password") {
            self.credentials.password = password.clone();
        }

        if let Some(user_id) = matches.get_one::<i64>("user-id") {
            self.credentials.user_id = *user_id;
        }

        if let Some(mode) = matches.get_one::<String>("mode") {
            self.driver.mode = DemoMode::parse(mode)?;
        }

        if matches.get_flag("no-pause") {
            self.driver.pause_on_exit = false;
        }

        if let Some(level) = matches.get_one::<String>("log-level") {
            self.logging.level = level.clone();
        }

        Ok(())
    }
}

/// Parse a timeout such as `500ms`, `10s`, `2m` or `1h`.
/// `0`, `0s` and `none` disable the timeout.
pub fn parse_timeout(value: &str) -> Result<Option<Duration>, ConfigError> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }

    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (digits, unit) = value.split_at(split);

    let amount: u64 = digits
        .parse()
        .map_err(|_| ConfigError::Message(format!("invalid timeout '{}'", value)))?;

    let duration = match unit.trim() {
        "ms" => Duration::from_millis(amount),
        "" | "s" => Duration::from_secs(amount),
        "m" => Duration::from_secs(checked_secs(amount, 60, value)?),
        "h" => Duration::from_secs(checked_secs(amount, 3600, value)?),
        other => {
            return Err(ConfigError::Message(format!(
                "invalid timeout unit '{}' in '{}'",
                other, value
            )))
        }
    };

    if duration.is_zero() {
        Ok(None)
    } else {
        Ok(Some(duration))
    }
}

fn checked_secs(amount: u64, unit_secs: u64, value: &str) -> Result<u64, ConfigError> {
    amount
        .checked_mul(unit_secs)
        .ok_or_else(|| ConfigError::Message(format!("invalid timeout '{}': too large", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeout_units() {
        assert_eq!(parse_timeout("500ms").unwrap(), Some(Duration::from_millis(500)));
        assert_eq!(parse_timeout("10s").unwrap(), Some(Duration::from_secs(10)));
        assert_eq!(parse_timeout("15").unwrap(), Some(Duration::from_secs(15)));
        assert_eq!(parse_timeout("2m").unwrap(), Some(Duration::from_secs(120)));
        assert_eq!(parse_timeout("1h").unwrap(), Some(Duration::from_secs(3600)));
    }

    #[test]
    fn test_parse_timeout_disabled() {
        assert_eq!(parse_timeout("none").unwrap(), None);
        assert_eq!(parse_timeout("0").unwrap(), None);
        assert_eq!(parse_timeout("0s").unwrap(), None);
    }

    #[test]
    fn test_parse_timeout_rejects_garbage() {
        assert!(parse_timeout("").is_err());
        assert!(parse_timeout("ten seconds").is_err());
        assert!(parse_timeout("10 fortnights").is_err());
    }

    #[test]
    fn test_parse_timeout_rejects_overflow() {
        assert!(parse_timeout("307445734561825861m").is_err());
        assert!(parse_timeout("5124095576030432h").is_err());
        assert!(parse_timeout("99999999999999999999s").is_err());
    }

    #[test]
    fn test_defaults_match_demo_values() {
        let config = AppConfig::default();

        assert_eq!(config.target.url, DEFAULT_URL);
        assert_eq!(config.target.method, "POST");
        assert_eq!(config.target.timeout().unwrap(), Some(Duration::from_secs(10)));
        assert!(!config.target.reuse_connections);
        assert_eq!(config.credentials.account, "snai");
        assert_eq!(config.credentials.user_id, 10000);
        assert_eq!(config.driver.mode, DemoMode::Both);
        assert!(config.driver.pause_on_exit);
        assert!(!config.target.headers.contains_key("Content-Type"));
        assert_eq!(config.target.headers.len(), 5);
    }

    #[test]
    fn test_demo_mode_parse() {
        assert_eq!(DemoMode::parse("FORM").unwrap(), DemoMode::Form);
        assert_eq!(DemoMode::parse("json").unwrap(), DemoMode::Json);
        assert!(DemoMode::parse("xml").is_err());
        assert!(DemoMode::Both.runs_form() && DemoMode::Both.runs_json());
        assert!(!DemoMode::Json.runs_form());
    }

    #[test]
    fn test_validate_rejects_bad_timeout() {
        let mut config = AppConfig::default();
        config.target.timeout = "soon".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_log_format() {
        let mut config = AppConfig::default();
        config.logging.format = "pretty".to_string();
        assert!(config.validate().is_ok());

        config.logging.format = "json".to_string();
        assert!(config.validate().is_err());
    }
}
