use clap::{Arg, ArgAction, Command};
use crate::internal::config::AppConfig;

pub fn build_cli() -> Command {
    // Leak the version string to get a 'static lifetime
    let version: &'static str = Box::leak(
        crate::internal::config::get_version_info().into_boxed_str()
    );

    Command::new("login-requester")
        .version(version)
        .about("Form and JSON login requests against an HTTP endpoint")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Path to config file (default: ./config.yaml, /etc/login-requester/config.yaml)")
        )
        .arg(
            Arg::new("url")
                .long("url")
                .short('u')
                .help("Login endpoint URL (e.g., http://localhost:8080/user/login)")
        )
        .arg(
            Arg::new("account")
                .long("account")
                .help("Account sent by the form request")
        )
        .arg(
            Arg::new("password")
                .long("password")
                .help("Password sent by both requests")
        )
        .arg(
            Arg::new("user-id")
                .long("user-id")
                .value_parser(clap::value_parser!(i64))
                .help("User id sent by the JSON request")
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .short('t')
                .help("Request timeout, e.g. 500ms, 10s, 1m; 0 or none disables it")
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .value_parser(["form", "json", "both"])
                .help("Which requests to send (form|json|both)")
        )
        .arg(
            Arg::new("no-pause")
                .long("no-pause")
                .action(ArgAction::SetTrue)
                .help("Exit without waiting for Enter")
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Log level or filter directive (overridden by RUST_LOG)")
        )
        .arg(
            Arg::new("print-config")
                .long("print-config")
                .action(ArgAction::SetTrue)
                .help("Print the effective configuration as YAML and exit")
        )
}

pub fn parse_config(matches: &clap::ArgMatches) -> anyhow::Result<AppConfig> {
    Ok(AppConfig::load_from_args(matches)?)
}

/// Effective configuration rendered as YAML
pub fn render_config(config: &AppConfig) -> anyhow::Result<String> {
    Ok(serde_yaml::to_string(config)?)
}
