use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    // Credentials may live in a local .env; absence is fine.
    let _ = dotenvy::dotenv();

    pocketpin::logging::init().context("init logging")?;

    let cli = pocketpin::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    let config = pocketpin::config::Config::from_env()?;
    tracing::debug!(user = %config.pinboard.username, "configuration loaded");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("build http client")?;

    let options = pocketpin::sync::SyncOptions {
        timestamp_file: cli.timestamp_file.into(),
        post_delay: Duration::from_millis(cli.delay_ms),
    };

    let summary = pocketpin::sync::run(&client, &config, &options)
        .await
        .context("sync")?;
    tracing::info!(
        posted = summary.posted,
        watermark = summary.watermark,
        "sync complete"
    );

    Ok(())
}
