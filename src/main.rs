use anyhow::Result;
use axum::{ServiceExt, body::Body};
use nexus_inventory::application::{
    audit::{MutationHookDispatcher, register_tracked_entities},
    ports::{security::PasswordHasher, time::Clock},
    services::ApplicationServices,
};
use nexus_inventory::config::AppConfig;
use nexus_inventory::domain::{audit::AuditLogRepository, record::RecordStore};
use nexus_inventory::infrastructure::{
    database,
    repositories::{InMemoryStore, SqliteAuditLogRepository, SqliteRecordStore},
    security::password::Argon2PasswordHasher,
    time::SystemClock,
};
use nexus_inventory::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let (record_store, audit_log_repo) = open_stores(&config).await?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::default());
    let dispatcher = Arc::new(
        register_tracked_entities(
            MutationHookDispatcher::builder(Arc::clone(&clock)),
            config.track_inventory(),
        )
        .build(),
    );
    tracing::info!(
        tracked = ?dispatcher.tracked_kinds(),
        "audit hooks registered"
    );

    let state = HttpState::new(ApplicationServices::new(
        record_store,
        audit_log_repo,
        dispatcher,
        password_hasher,
        clock,
    ));

    let app = build_router(state, config.allowed_origins());
    let service = app.into_service::<Body>().into_make_service();

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn open_stores(
    config: &AppConfig,
) -> Result<(Arc<dyn RecordStore>, Arc<dyn AuditLogRepository>)> {
    if config.uses_memory_store() {
        tracing::info!("using in-memory store; data is lost on shutdown");
        let store = InMemoryStore::new();
        return Ok((Arc::new(store.clone()), Arc::new(store)));
    }

    let pool =
        database::init_pool(config.database_url(), config.database_max_connections()).await?;
    database::run_migrations(&pool).await?;
    tracing::info!("database migrations applied");

    Ok((
        Arc::new(SqliteRecordStore::new(pool.clone())),
        Arc::new(SqliteAuditLogRepository::new(pool)),
    ))
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
