//! orderbot - command-line client for the order-bot owner flows.
//!
//! Logs in, signs up, and manages the bot's menu against the backend at
//! `ORDERBOT_API_BASE`. The session is kept on disk between runs.

mod app;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;
use orderbot_core::Config;

const USAGE: &str = "\
Usage: orderbot <command>

Commands:
  login [email]              Log in (prompts for the password)
  signup <email> <bot-name>  Create an owner account and its bot
  logout                     Revoke and forget the stored session
  status                     Show whether a session is stored
  menu                       List menu items
  menu save <file.json>      Replace the menu with the items in a JSON file
  open <path>                Show where navigating to <path> lands";

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    if matches!(args.first().copied(), None | Some("help" | "--help" | "-h")) {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = Config::from_env();
    info!(api_base = %config.api_base, "orderbot starting");
    let app = App::new(&config)?;

    match args.as_slice() {
        ["login"] => app.login(None).await,
        ["login", email] => app.login(Some(email.to_string())).await,
        ["signup", email, bot_name] => app.signup(email, bot_name).await,
        ["logout"] => app.logout().await,
        ["status"] => {
            app.status();
            Ok(())
        }
        ["menu"] => app.list_menu().await,
        ["menu", "save", file] => app.save_menu(&PathBuf::from(file)).await,
        ["open", path] => app.open(path),
        _ => {
            eprintln!("{}", USAGE);
            anyhow::bail!("Unknown command: {}", args.join(" "))
        }
    }
}
