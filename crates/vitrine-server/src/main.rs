//! vitrine-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! JSON document store, seeds the admin account if none exists, and serves
//! the admin and public APIs over HTTP.
//!
//! # Password hash generation
//!
//! To generate the argon2 PHC string for `admin_password_hash` in
//! config.toml:
//!
//! ```
//! cargo run -p vitrine-server --bin server -- --hash-password
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use vitrine_content::ContentGateway;
use vitrine_server::{AppState, ServerConfig, auth};
use vitrine_store_json::JsonStore;

#[derive(Parser)]
#[command(author, version, about = "Vitrine content and admin server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the argon2 hash for a password entered on stdin and exit.
  #[arg(long)]
  hash_password: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Helper mode: hash a password and exit.
  if cli.hash_password {
    let password = read_password()?;
    let hash = auth::hash_password(&password)?;
    println!("{hash}");
    return Ok(());
  }

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("VITRINE"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Open the document store.
  let data_dir = expand_tilde(&server_cfg.data_dir);
  let store = JsonStore::open(&data_dir)
    .await
    .with_context(|| format!("failed to open store at {data_dir:?}"))?;

  // Seed the admin account on first run.
  let seeded = auth::ensure_admin_account(
    &store,
    &server_cfg.admin_email,
    &server_cfg.admin_password_hash,
  )
  .await
  .context("failed to seed admin account")?;
  if seeded {
    tracing::info!(email = %server_cfg.admin_email, "seeded admin account");
  }

  // Content gateway: remote when configured, compiled fallback otherwise.
  let content = ContentGateway::new(server_cfg.remote_content())
    .context("failed to build content gateway")?;
  if content.is_configured() {
    tracing::info!("remote content service configured");
  } else {
    tracing::info!("no remote content service; serving fallback dataset");
  }

  let state = AppState {
    store: Arc::new(store),
    content,
    config: Arc::new(server_cfg.clone()),
    throttle: Arc::new(auth::LoginThrottle::new()),
  };

  let app = vitrine_server::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Read a password from stdin.
fn read_password() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  let stdin = io::stdin();
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  stdin.lock().read_line(&mut line)?;
  Ok(
    line
      .trim_end_matches('\n')
      .trim_end_matches('\r')
      .to_string(),
  )
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
