use gfg_stats_api::config::Config;
use gfg_stats_api::fetcher::HttpPageFetcher;
use gfg_stats_api::handlers::AppState;
use gfg_stats_api::profile::ProfileService;
use gfg_stats_api::rate_limiter::RateLimiter;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the application.
///
/// Initializes logging, loads configuration, builds the page fetcher and
/// rate limiter, then starts the Axum server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gfg_stats_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    let fetcher = HttpPageFetcher::new(&config)?;
    tracing::info!("Page fetcher initialized: {}", config.profile_base_url);

    // Sliding window: RATE_LIMIT_MAX_REQUESTS per RATE_LIMIT_WINDOW_SECS per client IP
    let limiter = RateLimiter::in_memory(
        Duration::from_secs(config.rate_limit_window_secs),
        config.rate_limit_max_requests,
    )
    .with_sweep_interval(Duration::from_secs(config.rate_limit_sweep_secs));
    tracing::info!(
        "Rate limiter initialized ({} requests / {}s)",
        config.rate_limit_max_requests,
        config.rate_limit_window_secs
    );

    let app_state = Arc::new(AppState {
        config: config.clone(),
        profiles: ProfileService::new(Arc::new(fetcher)),
        limiter,
    });

    let app = gfg_stats_api::api::router(app_state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
