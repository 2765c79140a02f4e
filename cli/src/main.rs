//! `admin`: command-line companion to the admin console.
//!
//! Shares the session and request logic with the browser client; the token
//! lives in a cookie-jar file instead of `document.cookie`.

mod commands;
mod error;
mod file_store;
mod http;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use session::{ApiConfig, Session};
use tracing_subscriber::EnvFilter;

use crate::commands::CliContext;
use crate::error::CliError;
use crate::file_store::FileTokenStore;
use crate::http::HttpTransport;

const SESSION_FILE_NAME: &str = ".admin_session";

#[derive(Parser, Debug)]
#[command(name = "admin", about = "Admin console CLI")]
struct Cli {
    #[arg(long, env = "ADMIN_BASE_URL", default_value = "http://127.0.0.1:5000")]
    base_url: String,

    /// Cookie-jar file holding the access token. Defaults to ~/.admin_session.
    #[arg(long, env = "ADMIN_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[arg(long, env = "ADMIN_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exchange username and password for an access token.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored token.
    Logout,
    /// Report whether a token is stored.
    Status,
    /// List users.
    Users {
        /// Print the raw JSON response instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Check that the backend is reachable.
    Ping,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<String, CliError> {
    let session_file = cli.session_file.unwrap_or_else(default_session_file);
    let ctx = CliContext {
        config: ApiConfig::new(cli.base_url),
        http: HttpTransport::new(Duration::from_secs(cli.timeout_secs))?,
        session: Session::new(FileTokenStore::new(session_file)),
    };

    match cli.command {
        Command::Login { username, password } => commands::login(&ctx, &username, password.as_deref()).await,
        Command::Logout => commands::logout(&ctx),
        Command::Status => Ok(commands::status(&ctx)),
        Command::Users { json } => commands::users(&ctx, json).await,
        Command::Ping => commands::ping(&ctx).await,
    }
}

fn default_session_file() -> PathBuf {
    std::env::var_os("HOME")
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
        .join(SESSION_FILE_NAME)
}
