//! yatri registration server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) plus `YATRI_*`
//! environment overrides, builds the PII cipher once, and serves the JSON
//! API over HTTP.
//!
//! # Check digits
//!
//! To print a checksum-valid identity number for an 11-digit body:
//!
//! ```
//! cargo run -p yatri-server -- --check-digit 23456789012
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use yatri_api::MemoryStore;
use yatri_cipher::PiiCipher;
use yatri_core::verhoeff::check_digit;

#[derive(Parser)]
#[command(author, version, about = "Yatri registration server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print BODY with its Verhoeff check digit appended and exit.
  #[arg(long, value_name = "BODY")]
  check_digit: Option<String>,
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

  // Helper mode: generate a check digit and exit.
  if let Some(body) = cli.check_digit {
    let digit = check_digit(&body).context("cannot compute check digit")?;
    println!("{body}{digit}");
    return Ok(());
  }

  let server_cfg = yatri_server::load_config(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let cipher = PiiCipher::from_config(&server_cfg.cipher())
    .context("failed to initialise PII cipher")?;
  tracing::info!(key_derivation = ?server_cfg.key_derivation, "PII cipher ready");

  let app = yatri_server::app(MemoryStore::default(), cipher);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
