//! The name validation web service.

use name_validation::{
    app,
    infra::{config, logging},
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let config = config::load_config()?;
    let _guard = logging::init_logging(&config)?;
    tracing::debug!(?config, "Loaded configuration");

    let listener = TcpListener::bind((
        config.server.http_address.as_str(),
        config.server.http_port,
    ))
    .await?;
    app::run_app(listener, config).await?;

    Ok(())
}
