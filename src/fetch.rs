use anyhow::{Context, Result};
use tracing::info;

/// Download the translation package and return the whole body.
///
/// There is no retry: any transport error or non-success status aborts the run.
pub async fn fetch_package(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    info!("Downloading translation package from {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .context(format!("Failed to fetch translation package from {}", url))?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("Translation package download failed: HTTP {} ({})", status, url);
    }

    let body = response
        .bytes()
        .await
        .context("Failed to read translation package body")?;

    info!("Downloaded {} bytes", body.len());

    Ok(body.to_vec())
}
