/// Fetch one article through the live Diffbot API and print the raw body.
///
/// Reads `DIFFBOT_TOKEN` (and optionally `DIFFBOT_BASE_URL`) from the
/// environment or a `.env` file.
///
/// Run with:
///   cargo run --example fetch_article -- https://example.com/some-article
use std::sync::Arc;

use anyhow::Context;
use diffbot_client::{TracingInstrumentor, connect};
use diffbot_core::{ArticleParams, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("diffbot=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let url = std::env::args()
        .nth(1)
        .context("usage: fetch_article <url>")?;

    let mut config = Config::from_env()?;
    config.set_instrumentor(Arc::new(TracingInstrumentor::new()));
    config.set_defaults(ArticleParams::new().with_tags(true).with_max_tags(10));

    let diffbot = connect(config)?;
    let options = ArticleParams::new().with_summary(true);
    let response = diffbot.article().fetch(&url, Some(&options)).await?;

    let status = response.status();
    let body = response.text().await.context("Failed to read response body")?;

    println!("HTTP {status}");
    println!("{body}");
    Ok(())
}
