//! oac-feed - OpenActive clubs feed service
//!
//! Serves one RPDE page aggregating club, organizer and location rows from
//! every configured spreadsheet. The feed is rebuilt from the sheets on
//! every request.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use oac_common::config::{resolve_toml_config, ConfigOverrides, ServiceConfig};
use oac_common::SpreadsheetIds;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oac_feed::engine::{FeedAssembler, SheetLayout};
use oac_feed::sheets::{Credentials, GoogleSheetsClient, InMemorySheets, SheetSource};
use oac_feed::{build_router, AppState};

/// Command-line arguments for oac-feed
#[derive(Parser, Debug)]
#[command(name = "oac-feed")]
#[command(about = "OpenActive clubs feed built from spreadsheets")]
#[command(version)]
struct Args {
    /// TOML config file
    #[arg(short, long, env = "OAC_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "OAC_BIND")]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Line-delimited list of spreadsheet ids
    #[arg(long, env = "OAC_SPREADSHEET_IDS")]
    spreadsheet_ids: Option<PathBuf>,

    /// Google Sheets API base URL
    #[arg(long, env = "OAC_SHEETS_API_BASE")]
    sheets_api_base: Option<String>,

    /// OAuth access token for the Sheets API
    #[arg(long, env = "OAC_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// API key for publicly readable spreadsheets
    #[arg(long, env = "OAC_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Externally visible base URL for `@id` and `next` links
    #[arg(long, env = "OAC_PUBLIC_BASE_URL")]
    public_base_url: Option<String>,

    /// Leading rows (field names + metadata) before data begins
    #[arg(long, env = "OAC_HEADER_ROWS")]
    header_rows: Option<usize>,

    /// Zero-based column holding each row's join code
    #[arg(long, env = "OAC_CODE_COLUMN")]
    code_column: Option<usize>,

    /// Serve sheets from a JSON fixture file instead of the Sheets API
    #[arg(long, env = "OAC_FIXTURES")]
    fixtures: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bind: self.bind.clone(),
            port: self.port,
            spreadsheet_ids: self.spreadsheet_ids.clone(),
            sheets_api_base: self.sheets_api_base.clone(),
            access_token: self.access_token.clone(),
            api_key: self.api_key.clone(),
            public_base_url: self.public_base_url.clone(),
            header_rows: self.header_rows,
            code_column: self.code_column,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is resolved before the subscriber exists: it carries the log level.
    // The load outcome is logged once the subscriber is up.
    let loaded = resolve_toml_config(args.config.as_deref())?;
    let config_source = loaded.source;
    let config = ServiceConfig::resolve(args.overrides(), loaded.toml)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},tower_http=info", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting oac-feed v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    config_source.log();
    if let Some(url) = &config.public_base_url {
        info!("Public base URL: {}", url);
    }

    let layout = SheetLayout::new(config.header_rows, config.code_column);
    info!(
        "Sheet layout: {} header row(s), code column {}",
        layout.header_rows, layout.code_column
    );

    let (source, spreadsheet_ids) = match &args.fixtures {
        Some(path) => {
            let fixtures = InMemorySheets::load(path)
                .with_context(|| format!("Failed to load fixtures {}", path.display()))?;
            let ids = SpreadsheetIds::new(fixtures.spreadsheet_ids());
            warn!(
                "Serving {} spreadsheet(s) from fixtures {}",
                ids.len(),
                path.display()
            );
            let source: Arc<dyn SheetSource> = Arc::new(fixtures);
            (source, ids)
        }
        None => {
            let ids = SpreadsheetIds::load(&config.spreadsheet_ids)?;
            let credentials =
                Credentials::from_options(config.access_token.clone(), config.api_key.clone());
            info!(
                "Google Sheets API: {} ({})",
                config.sheets_api_base,
                credentials.describe()
            );
            if credentials == Credentials::Anonymous {
                warn!("No access token or API key configured; Sheets API requests are unauthenticated");
            }
            let client = GoogleSheetsClient::new(&config.sheets_api_base, credentials)
                .context("Failed to create Google Sheets client")?;
            let source: Arc<dyn SheetSource> = Arc::new(client);
            (source, ids)
        }
    };

    let assembler = FeedAssembler::new(source, spreadsheet_ids, layout);
    let state = AppState::new(assembler, config.public_base_url.clone());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind((config.bind.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind to {}:{}", config.bind, config.port))?;
    info!("oac-feed listening on http://{}:{}", config.bind, config.port);
    info!("Health check: http://{}:{}/health", config.bind, config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
