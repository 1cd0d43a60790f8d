use anyhow::{Context, Result};
use axum::Router;
use sqlx::sqlite::SqlitePoolOptions;
use std::{fs, io::ErrorKind, path::Path, sync::Arc};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod config;
mod errors;
mod handlers;
mod models;
mod routes;
mod services;
mod state;
mod validation;

use config::PhraseBackend;
use services::{
    clip_service::ClipService,
    events::ChangeNotifier,
    migrations,
    phrase_service::PhraseService,
    phrase_store::{MemoryPhraseStore, PhraseStore},
    social_upload::SocialUploadService,
    sqlite_phrase_store::SqlitePhraseStore,
};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // --- Logging setup ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // --- Parse config + migrate flag ---
    let (cfg, migrate) = config::AppConfig::from_env_and_args()?;

    tracing::info!("Starting phrase-console with config: {:?}", cfg);

    // --- Ensure clip storage directory exists ---
    if !Path::new(&cfg.storage_dir).exists() {
        fs::create_dir_all(&cfg.storage_dir)?;
        tracing::info!("Created storage directory at {}", cfg.storage_dir);
    }

    // --- Initialize SQLite connection when needed ---
    let db = if migrate || cfg.phrase_backend == PhraseBackend::Sqlite {
        Some(connect_sqlite(&cfg.database_url).await?)
    } else {
        None
    };

    // --- Handle migration mode ---
    if migrate {
        if let Some(db) = &db {
            migrations::run_file(db, migrations::INIT_MIGRATION).await?;
        }
        tracing::info!("Database migration complete.");
        return Ok(()); // exit after migration
    }

    // --- Initialize core services ---
    let notifier = ChangeNotifier::new();
    let store: Arc<dyn PhraseStore> = match &db {
        Some(db) => Arc::new(SqlitePhraseStore::new(db.clone())),
        None => {
            tracing::warn!("Using the in-memory phrase store; changes are lost on restart");
            Arc::new(MemoryPhraseStore::with_samples())
        }
    };
    if cfg.social_api_key.is_none() {
        tracing::warn!("PHRASE_CONSOLE_SOCIAL_API_KEY is not set; social uploads will fail");
    }

    let state = AppState {
        phrases: PhraseService::new(store, notifier.clone()),
        uploads: SocialUploadService::new(
            cfg.social_api_url.clone(),
            cfg.social_api_key.clone(),
            notifier.clone(),
        )
        .context("building social posting HTTP client")?,
        clips: ClipService::new(&cfg.storage_dir),
        notifier,
        db,
    };

    // --- Build router ---
    let app: Router = routes::routes::routes().with_state(state);

    // --- Start server ---
    let addr = cfg.addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err)
            if err.kind() == ErrorKind::PermissionDenied
                && matches!(cfg.host.as_str(), "0.0.0.0" | "::") =>
        {
            let fallback_addr = format!("127.0.0.1:{}", cfg.port);
            tracing::warn!(
                "Permission denied binding to {} ({}). Falling back to {}",
                addr,
                err,
                fallback_addr
            );
            TcpListener::bind(&fallback_addr).await?
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Open the SQLite pool, creating the database file and its parent directory
/// if they do not exist yet.
async fn connect_sqlite(db_url: &str) -> Result<Arc<sqlx::Pool<sqlx::Sqlite>>> {
    tracing::debug!("Connecting using raw URL => {}", db_url);

    // Extract the local file path SQLx will use
    let db_path = db_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .trim_start_matches("file:");

    if !db_path.starts_with(":memory:") {
        let db_path_obj = Path::new(db_path);
        if let Some(parent) = db_path_obj.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
                tracing::info!("Created missing directory {:?}", parent);
            }
        }

        if let Err(e) = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(db_path_obj)
        {
            tracing::warn!("Failed to open database file manually: {}", e);
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await
        .with_context(|| format!("connecting to {db_url}"))?;

    Ok(Arc::new(pool))
}
