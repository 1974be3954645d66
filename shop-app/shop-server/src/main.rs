use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{error, info};

use shop_api::{build_router, AppState};
use shop_core::repositories::{ItemRepository, MemberRepository};
use shop_infrastructure::{
    create_pool, run_migrations, InMemoryItemRepository, InMemoryMemberRepository, PgItemRepository,
    PgMemberRepository, StorePolicy,
};
use shop_security::PasswordService;
use shop_shared::config::{AppConfig, DatabaseSettings, StorageBackend};
use shop_shared::utils::mask_url_credentials;

type Repositories = (Arc<dyn ItemRepository>, Arc<dyn MemberRepository>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize telemetry; the guard flushes the file writer on exit
    let _log_guard = shop_shared::telemetry::init_telemetry(&config.app)?;

    info!(env = %config.app.env, "{} starting...", config.app.name);

    // Storage
    let (item_repo, member_repo) = match connect_repositories(&config.database).await {
        Ok(repos) => repos,
        Err(e) => {
            error!("Failed to initialise storage: {:#}", e);
            return Err(e);
        }
    };

    // Services
    let passwords = PasswordService::new(config.security.bcrypt_cost)
        .context("Invalid security.bcrypt_cost")?;
    let state = AppState::new(item_repo, member_repo, passwords, &config.search);

    // Build router
    let app = build_router(state, Duration::from_secs(config.app.request_timeout_secs));

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse().context("Invalid app.host")?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn connect_repositories(settings: &DatabaseSettings) -> anyhow::Result<Repositories> {
    match settings.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on restart");
            Ok((
                Arc::new(InMemoryItemRepository::new()),
                Arc::new(InMemoryMemberRepository::new()),
            ))
        }
        StorageBackend::Postgres => {
            info!("Connecting to database at {}...", mask_url_credentials(&settings.url));
            let pool = create_pool(settings).await.context("Database connection failed")?;
            info!("Database connection established.");

            if settings.migrate_on_start {
                run_migrations(&pool).await.context("Database migration failed")?;
                info!("Migrations applied.");
            }

            let policy = StorePolicy::from_settings(settings);
            Ok((
                Arc::new(PgItemRepository::new(pool.clone(), policy)),
                Arc::new(PgMemberRepository::new(pool, policy)),
            ))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
