// src/fetch/mod.rs

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub const USER_AGENT: &str = concat!("tdfscraper/", env!("CARGO_PKG_VERSION"));

/// HTTP client with the tool's user agent and request timeout.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .context("building HTTP client")
}

/// Single GET of `url`, returning the body as text. No retries: any network
/// failure or non-success status ends the run.
#[tracing::instrument(level = "info", skip(client))]
pub async fn fetch_html(client: &Client, url: &str) -> Result<String> {
    let url = Url::parse(url).with_context(|| format!("invalid page URL {:?}", url))?;
    debug!("Fetching text from {}", url);
    let html = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", url))?
        .text()
        .await
        .with_context(|| format!("Reading text from {}", url))?;
    info!(bytes = html.len(), "fetched page");
    Ok(html)
}
