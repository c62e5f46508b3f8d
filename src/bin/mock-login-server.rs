use clap::{Arg, Command};
use login_requester::internal::config::{self, LoggingConfig};
use login_requester::internal::server::{MockServer, MockUser};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Leak the version string to get a 'static lifetime
    let version: &'static str = Box::leak(config::get_version_info().into_boxed_str());

    let matches = Command::new("mock-login-server")
        .version(version)
        .about("Local login endpoint answering form and JSON login requests")
        .arg(
            Arg::new("host")
                .long("host")
                .default_value("127.0.0.1")
                .help("Server host"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .short('p')
                .value_parser(clap::value_parser!(u16))
                .default_value("8080")
                .help("Server port"),
        )
        .arg(
            Arg::new("user-id")
                .long("user-id")
                .value_parser(clap::value_parser!(i64))
                .default_value("10000")
                .help("User id of the accepted account"),
        )
        .arg(
            Arg::new("account")
                .long("account")
                .default_value("snai")
                .help("Accepted account name"),
        )
        .arg(
            Arg::new("password")
                .long("password")
                .default_value("snai")
                .help("Accepted password"),
        )
        .get_matches();

    let host = matches
        .get_one::<String>("host")
        .map(String::as_str)
        .unwrap_or("127.0.0.1");
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let user = MockUser::new(
        matches.get_one::<i64>("user-id").copied().unwrap_or(10000),
        matches
            .get_one::<String>("account")
            .cloned()
            .unwrap_or_default(),
        matches
            .get_one::<String>("password")
            .cloned()
            .unwrap_or_default(),
    );

    login_requester::internal::logger::init_logger(&LoggingConfig {
        level: "debug".to_string(),
        ..Default::default()
    })?;

    let server = MockServer::bind(&format!("{}:{}", host, port), vec![user]).await?;
    server.serve_with_graceful_shutdown().await
}
