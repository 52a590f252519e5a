use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bountydesk_core::{
    create_authenticator, load_config, validate_config, Authenticator, BountyStore,
    ConnectionCodeStore, Database, FeatureDirectory, HttpBuilderClient, SqliteBountyStore,
    SqliteConnectionCodeStore, SqliteFeatureDirectory, SqliteTicketStore, TicketStore,
    WorkflowDispatcher,
};
use bountydesk_server::{create_router, AppState};

/// Environment variable naming the config file.
const CONFIG_ENV: &str = "BOUNTYDESK_CONFIG";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::var(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Auth method: {}", config.auth.method.as_str());
    info!("Database path: {:?}", config.database.path);

    let authenticator: Arc<dyn Authenticator> = Arc::from(
        create_authenticator(&config.auth).context("Failed to create authenticator")?,
    );
    info!("Using authenticator: {}", authenticator.method_name());

    let db = Arc::new(
        Database::open(&config.database.path)
            .with_context(|| format!("Failed to open database {:?}", config.database.path))?,
    );

    let bounty_store: Arc<dyn BountyStore> = Arc::new(
        SqliteBountyStore::new(Arc::clone(&db)).context("Failed to create bounty store")?,
    );
    let ticket_store: Arc<dyn TicketStore> = Arc::new(
        SqliteTicketStore::new(Arc::clone(&db)).context("Failed to create ticket store")?,
    );
    let connection_code_store: Arc<dyn ConnectionCodeStore> = Arc::new(
        SqliteConnectionCodeStore::new(Arc::clone(&db), config.connection_codes.dispense_order)
            .context("Failed to create connection code store")?,
    );
    let features: Arc<dyn FeatureDirectory> = Arc::new(
        SqliteFeatureDirectory::new(Arc::clone(&db))
            .context("Failed to create feature directory")?,
    );
    info!("Stores initialized");

    if config.builder.api_key.is_none() || config.builder.callback_host.is_none() {
        warn!("Builder credentials incomplete; review dispatch will fail until configured");
    }

    let builder_client = HttpBuilderClient::new(
        &config.builder.api_url,
        Duration::from_secs(config.builder.timeout_secs),
    )
    .context("Failed to create builder client")?;
    let dispatcher = WorkflowDispatcher::new(
        Arc::new(builder_client),
        Arc::clone(&features),
        config.builder.clone(),
    );
    info!(
        "Dispatching to workflow {} ({}) at {}",
        config.builder.workflow_id, config.builder.workflow_name, config.builder.api_url
    );

    let state = Arc::new(AppState::new(
        config.clone(),
        authenticator,
        bounty_store,
        ticket_store,
        connection_code_store,
        features,
        dispatcher,
    ));

    let app = create_router(state);

    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("Server shutting down...");

    // The router and every store went away with the server.
    match Arc::try_unwrap(db) {
        Ok(db) => {
            db.close().context("Failed to close database")?;
            info!("Database closed");
        }
        Err(_) => warn!("Database still referenced at shutdown, leaving it to drop"),
    }

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
