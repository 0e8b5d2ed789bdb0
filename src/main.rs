use std::path::PathBuf;
use std::sync::Arc;

use accolade::{handlers, microsvc, InMemoryStore, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = ServiceConfig::load(config_path.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .init();

    tracing::warn!("using the in-memory store; awards are lost on restart");
    let service = Arc::new(handlers::service(InMemoryStore::new()));
    microsvc::serve(service, &config.bind).await?;
    Ok(())
}
