use std::net::SocketAddr;
use std::sync::Arc;

use bazaar_api::{app, AppState};
use bazaar_core::Principal;
use bazaar_store::{app_config::Config, MemoryBackend, SeedData};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bazaar_api=debug,bazaar_store=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting Bazaar API on port {}", config.server.port);

    let seed = match &config.store.seed_path {
        Some(path) => {
            tracing::info!("Loading seed data from {}", path);
            SeedData::load(path).await?
        }
        None => SeedData::default(),
    };
    let admins = config.store.admins.iter().map(Principal::new);
    let backend = Arc::new(MemoryBackend::with_seed(admins, seed));

    let app_state = AppState::new(backend, config.pricing.clone(), config.escrow)
        .with_order_limit(config.server.max_orders);
    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
