mod binder;
mod catalog;
mod config;
mod error;
mod source;
mod utils;
mod view;
mod web;

use crate::config::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        "Serving parks from {} and trails from {}",
        config.parks_path.display(),
        config.trails_path.display()
    );

    web::start_server(config).await
}
