use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics are opt-in via CAMCHAT_LOG so the TUI screen stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CAMCHAT_LOG").unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();

    camchat::cli::run().await
}
