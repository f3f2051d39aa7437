use tracing_forest::ForestLayer;
use tracing_subscriber::{prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "blogly=debug,tower_http=info,info";

/// Install the global subscriber. `RUST_LOG` wins over the built-in filter.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(ForestLayer::default())
        .init();
}
