use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plantwatch_api::config::ServerConfig;
use plantwatch_api::router::build_app_router;
use plantwatch_api::state::AppState;
use plantwatch_events::{EventBus, FeedLogger};
use plantwatch_monitor::client::HttpGardenClient;
use plantwatch_monitor::scheduler::RefreshScheduler;
use plantwatch_monitor::{FeedCoordinator, NotificationEngine};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "plantwatch_api=info,plantwatch_monitor=info,plantwatch_events=info,tower_http=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };
    tracing::info!(
        host = %config.host,
        port = config.port,
        garden_api_url = %config.monitor.garden_api_url,
        "Loaded server configuration"
    );

    // --- Garden client and engine ---
    let client = match HttpGardenClient::new(
        config.monitor.garden_api_url.clone(),
        config.monitor.fetch_timeout,
    ) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build garden API client");
            std::process::exit(1);
        }
    };
    let engine =
        NotificationEngine::from_source(client).with_fetch_timeout(config.monitor.fetch_timeout);

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());
    let logger_handle = tokio::spawn(FeedLogger::run(event_bus.subscribe()));

    let coordinator = Arc::new(FeedCoordinator::new(engine, Arc::clone(&event_bus)));
    drop(event_bus);

    // --- Refresh scheduler ---
    let scheduler_cancel = CancellationToken::new();
    let scheduler =
        RefreshScheduler::new(Arc::clone(&coordinator), config.monitor.refresh_interval);
    let scheduler_handle = {
        let cancel = scheduler_cancel.clone();
        tokio::spawn(async move { scheduler.run(cancel).await })
    };

    // --- Router ---
    let state = AppState {
        config: Arc::new(config.clone()),
        coordinator,
    };
    let app = build_app_router(state);

    // --- Start server ---
    let host: IpAddr = match config.host.parse() {
        Ok(host) => host,
        Err(e) => {
            tracing::error!(host = %config.host, error = %e, "Invalid HOST address");
            std::process::exit(1);
        }
    };
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
    }

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    scheduler_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), scheduler_handle).await;
    tracing::info!("Refresh scheduler stopped");

    // The scheduler held the last coordinator, and with it the bus sender;
    // the logger sees the channel close and exits.
    let _ = tokio::time::timeout(Duration::from_secs(5), logger_handle).await;

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
