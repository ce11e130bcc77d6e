use anyhow::Result;
use tracing::info;
use update_translations::{config, pipeline};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file (optional)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("update_translations=info".parse()?),
        )
        .init();

    info!("Starting translation update");

    let config = config::Config::from_env();
    pipeline::run(&config).await?;

    info!("Translations updated");
    Ok(())
}
