use clap::Parser;
use nearby_cycles::api::{self, AppState};
use nearby_cycles::config::Config;
use nearby_cycles::feed::FeedClient;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = Config::parse();

    if let Err(e) = config.validate() {
        tracing::error!("Failed to initialize config: {}", e);
        return;
    }

    tracing::info!(
        "Starting nearby cycles service ({:?} feed, {} km radius)...",
        config.feed_format,
        config.nearby_radius_km
    );

    let feed = match FeedClient::new(config.feed_config()) {
        Ok(feed) => feed,
        Err(e) => {
            tracing::error!("Failed to build feed client: {}", e);
            return;
        }
    };

    let state = AppState {
        feed,
        nearby_radius_km: config.nearby_radius_km,
    };

    if let Err(e) = api::run_server(state, config.port).await {
        tracing::error!("API server exited: {}", e);
    }
}
