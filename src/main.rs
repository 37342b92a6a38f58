use clap::Parser;
use tracing_subscriber::EnvFilter;

use dns_digest::cli::Cli;
use dns_digest::config::{validate_webhook_url, Config};
use dns_digest::errors::DigestResult;
use dns_digest::services::{
    DeliveryOutcome, DigestService, FetchService, NotificationService, RunReport,
};
use dns_digest::sources::RssSource;

fn main() {
    // Logs go to stderr so a dry-run payload on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run() {
        tracing::error!(error = %e, "Run failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> DigestResult<()> {
    let cli = Cli::parse();

    tracing::info!("Starting DNS news digest");

    // Load configuration
    let config = match cli.env_file {
        Some(ref path) => Config::from_env_file(path)?,
        None => Config::from_env()?,
    }
    .with_category(cli.category.clone());
    config.validate()?;

    match config.webhook_url.as_deref() {
        None => tracing::warn!("SLACK_WEBHOOK_URL is not set. Slack notification will fail."),
        Some(url) => {
            if let Err(e) = validate_webhook_url(url) {
                tracing::warn!(error = %e, "Slack notification will fail");
            }
        }
    }

    let fetch_service = FetchService::new(
        RssSource::new(config.fetch_timeout)?,
        &config.feed_url,
        &config.category,
    );
    let notification_service = NotificationService::from_config(&config)?;
    let service = DigestService::new(fetch_service, notification_service);

    match service.run(cli.dry_run)? {
        RunReport::NothingToSend { total_items } => {
            tracing::info!(items = total_items, "No new DNS-related articles found");
        }
        RunReport::DryRun { entries, message } => {
            tracing::info!(entries, "Dry run complete, payload not sent");
            println!("{}", serde_json::to_string_pretty(&message)?);
        }
        RunReport::Delivered { entries, outcome } => match outcome {
            DeliveryOutcome::Confirmed { .. } => {
                tracing::info!(entries, "Successfully sent notification to Slack");
            }
            DeliveryOutcome::Unconfirmed { status, body } => {
                tracing::info!(entries, status, body = %body, "Slack accepted the request with an unexpected body");
            }
            DeliveryOutcome::Skipped => {
                tracing::info!("Nothing was sent to Slack");
            }
        },
    }

    tracing::info!("Digest run finished successfully");
    Ok(())
}
