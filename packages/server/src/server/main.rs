// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use registration_core::domains::auth::AdminSessionAuthority;
use registration_core::kernel::{
    BaseEmailService, BaseReceiptStore, LocalReceiptStore, NoopEmailService, NotificationOutbox,
    PgRegistrationStore, ResendAdapter, ServerDeps, SupabaseReceiptStore,
};
use registration_core::server::{build_app, AppState};
use registration_core::Config;
use resend::{ResendOptions, ResendService};
use sqlx::postgres::PgPoolOptions;
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,registration_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Workshop Registration API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        review_policy = %config.review_policy,
        registration_open = config.registration_open,
        production = config.production,
        "Configuration loaded"
    );

    // Connect to database
    info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    info!("Database connected");

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    info!("Migrations complete");

    // Receipt storage: Supabase when configured, local directory otherwise
    let receipts: Arc<dyn BaseReceiptStore> = match (
        config.supabase_url.as_deref(),
        config.supabase_service_role_key.clone(),
    ) {
        (Some(url), Some(key)) => {
            info!(bucket = %config.receipts_bucket, "Storing receipts in Supabase");
            Arc::new(SupabaseReceiptStore::new(
                url,
                key,
                config.receipts_bucket.clone(),
            ))
        }
        _ => {
            info!(dir = %config.receipts_dir, "Storing receipts on local disk");
            Arc::new(LocalReceiptStore::new(&config.receipts_dir))
        }
    };

    // Email: Resend when configured, log-only otherwise
    let email_service: Arc<dyn BaseEmailService> = match config.resend_api_key.clone() {
        Some(key) => Arc::new(ResendAdapter::new(
            Arc::new(ResendService::new(ResendOptions::new(key))),
            config.email_from.clone(),
        )),
        None => {
            tracing::warn!("RESEND_API_KEY not set, emails will be logged and skipped");
            Arc::new(NoopEmailService)
        }
    };
    let (outbox, worker) = NotificationOutbox::spawn(email_service);

    let deps = ServerDeps::new(
        Arc::new(PgRegistrationStore::new(pool)),
        receipts,
        outbox,
        config.review_policy,
        config.registration_open,
        config.support_phone.clone(),
    );
    let sessions = AdminSessionAuthority::new(config.admin_password.clone(), &config.session_secret);
    let app = build_app(
        AppState::new(deps, sessions, config.production),
        &config.allowed_origins,
    );

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    info!("Starting server on {}", addr);
    info!("Admin: http://localhost:{}/admin", config.port);
    info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Router (and every outbox handle) is gone; let queued emails drain
    match tokio::time::timeout(std::time::Duration::from_secs(10), worker).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!(error = %e, "Notification worker panicked"),
        Err(_) => tracing::warn!("Timed out waiting for queued emails"),
    }

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await
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
