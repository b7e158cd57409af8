//! Null View Observer - headless entry point.
//!
//! Follows one world and logs its live ticker until interrupted.
//! The world id comes from the first argument or `NULLVIEW_WORLD_ID`.

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nullview_domain::WorldId;
use nullview_observer::infrastructure::http_client::SimulationClient;
use nullview_observer::infrastructure::websocket::{FixedDelay, TungsteniteLiveChannel};
use nullview_observer::ports::outbound::{LiveChannelPort, SimulationApiPort};
use nullview_observer::projections::TickerBuilder;
use nullview_observer::{ConnectionManager, FeedPaginator, ObserverConfig, WorldService, WorldStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nullview_observer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ObserverConfig::from_env().context("invalid observer configuration")?;
    let world_id = world_id_from_args()?;
    tracing::info!(%world_id, api_url = %config.api_url, ws_url = %config.ws_url, "Starting Null View Observer");

    let api: Arc<dyn SimulationApiPort> = Arc::new(SimulationClient::with_timeout(
        &config.api_url,
        config.http_timeout_secs,
    ));
    let channel: Arc<dyn LiveChannelPort> = Arc::new(TungsteniteLiveChannel::new(&config.ws_url));

    let store = WorldStore::new(Arc::clone(&api)).with_herald_ttl(config.herald_ttl);
    let worlds =
        WorldService::new(Arc::clone(&api), store.clone()).with_poll_interval(config.poll_interval);
    let feed = FeedPaginator::new(Arc::clone(&api), store.clone())
        .with_page_size(config.feed_page_size);
    let connection = ConnectionManager::new(channel, store.clone())
        .with_policy(FixedDelay::new(config.reconnect_delay));

    let mut envelopes = store.subscribe();

    worlds.fetch_world(world_id).await;
    feed.load_initial(world_id).await;
    connection.connect(world_id).await;

    let mut ticker = TickerBuilder::new();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
            received = envelopes.recv() => match received {
                Ok(envelope) => {
                    let snapshot = store.snapshot().await;
                    let directory = snapshot.directory();
                    for row in ticker.push(&envelope, &directory) {
                        tracing::info!(epoch = row.epoch, kind = ?row.kind, "{}", row.text);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Ticker fell behind the live stream");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    worlds.stop_generation_poll().await;
    connection.disconnect().await;
    Ok(())
}

fn world_id_from_args() -> anyhow::Result<WorldId> {
    let raw = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("NULLVIEW_WORLD_ID").ok())
        .context("usage: nullview-observer <world-id> (or set NULLVIEW_WORLD_ID)")?;
    raw.trim()
        .parse()
        .with_context(|| format!("invalid world id: {raw}"))
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
