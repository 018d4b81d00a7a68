use std::sync::Arc;

use tower_http::cors::CorsLayer;

use notify_gate::api::{self, AppState};
use notify_gate::config::Config;
use notify_gate::store::{MemoryStore, PreferenceStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = Config::from_env()?;

    eprintln!("🔔 notify-gate v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Events API: http://0.0.0.0:{}{}/events", config.port, config.api_prefix);
    eprintln!(
        "   Preferences API: http://0.0.0.0:{}{}/preferences/:userId",
        config.port, config.api_prefix
    );
    eprintln!("   Health: http://0.0.0.0:{}/health\n", config.port);

    let store: Arc<dyn PreferenceStore> = Arc::new(MemoryStore::new());
    let app = api::routes(AppState::new(store), &config.api_prefix)
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
