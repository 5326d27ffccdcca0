use anyhow::Result;
use clap::Parser;
use pizzeria_order_cli::cli::{Args, CliApp};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    tracing::info!("🍕 Pizzeria order CLI starting...");

    let app = CliApp::new(args.catalog.clone()).await.map_err(|e| {
        tracing::error!("Failed to start: {}", e);
        e
    })?;

    app.run(args).await
}
