//! Facemate Server - HTTP REST API for face identity training and matching

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Values from .env are visible to the config loader
    dotenvy::dotenv().ok();

    let config = ServerConfig::load()?;
    server::start_server(config).await?;

    Ok(())
}
