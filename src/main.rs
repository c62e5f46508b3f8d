use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use login_requester::cli::{build_cli, parse_config, render_config};
use login_requester::internal::login::Driver;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments first
    let matches = build_cli().get_matches();
    let config = match parse_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if matches.get_flag("print-config") {
        print!("{}", render_config(&config)?);
        return Ok(());
    }

    // Initialize logging
    if let Err(e) = login_requester::internal::logger::init_logger(&config.logging) {
        eprintln!("Failed to initialize logger: {}", e);
        std::process::exit(1);
    }

    info!("Starting login requester");
    info!("Version: {}", login_requester::internal::config::get_version_info());
    info!("Target: {} {}", config.target.method, config.target.url);
    info!("Mode: {:?}", config.driver.mode);

    let driver = match Driver::from_config(&config) {
        Ok(driver) => driver,
        Err(e) => {
            error!("Failed to create driver: {:#}", e);
            std::process::exit(1);
        }
    };

    let mut stdout = std::io::stdout();
    let result = driver.run(&mut stdout).await;

    if let Err(e) = &result {
        println!("{}", e);
        error!("Login demonstration failed: {:?}", e);
    }

    if config.driver.pause_on_exit {
        wait_for_enter().await;
    }

    if result.is_err() {
        std::process::exit(1);
    }

    info!("Done");
    Ok(())
}

/// Keep a double-clicked console window open until Enter is pressed
async fn wait_for_enter() {
    let mut line = String::new();
    let mut stdin = BufReader::new(tokio::io::stdin());
    if let Err(e) = stdin.read_line(&mut line).await {
        error!("Failed to read from stdin: {}", e);
    }
}
