use anyhow::Result;
use tdfscraper::{config::Config, fetch, model::format_duration, pipeline};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tdfscraper=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) configure ────────────────────────────────────────────────
    let config = Config::from_env()?;
    info!(url = %config.url, table = ?config.table, "config loaded");
    let client = fetch::build_client(config.timeout)?;

    // ─── 3) scrape, clean, export ────────────────────────────────────
    let outcome = pipeline::run(&client, &config).await?;

    if let (Some(first), Some(last)) = (outcome.table.iter().next(), outcome.table.iter().last()) {
        info!(
            first = first.year,
            last = last.year,
            last_time = ?last.overall_time.duration().map(format_duration),
            "results table ready"
        );
    }

    info!("all done");
    Ok(())
}
