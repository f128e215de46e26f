//! Headless search host binary for stdin/stdout JSON communication.
//!
//! This binary reads `CommandEnvelope` messages as newline-delimited JSON
//! from stdin, dispatches them through the search pipeline, and writes
//! `ResponseEnvelope` messages to stdout.
//!
//! All tracing/diagnostic output goes to stderr so that stdout remains a
//! clean JSON protocol channel.

use cms_preview::config::PreviewConfig;
use cms_preview::host::stdio::run_stdio_bridge;
use cms_preview::pipeline::SearchPipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args_os()
        .nth(1)
        .map(std::path::PathBuf::from)
        .unwrap_or_else(PreviewConfig::default_path);
    let config = PreviewConfig::load_or_default(&config_path)?;

    // Initialise tracing to stderr only (stdout is reserved for the JSON
    // protocol).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.filter)),
        )
        .init();

    tracing::info!(config = %config_path.display(), "cms-preview-host starting");

    let pipeline = SearchPipeline::from_config(&config)?;

    run_stdio_bridge(pipeline).await.map_err(|e| {
        tracing::error!(error = %e, "cms-preview-host exited with error");
        anyhow::anyhow!("cms-preview-host failed: {e}")
    })?;

    tracing::info!("cms-preview-host shut down cleanly");
    Ok(())
}
