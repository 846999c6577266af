//! Publish command: drives one plugin release end to end.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};

use plugship_archive::read_descriptor;
use plugship_config::{Config, ConfigError, find_and_load_config};
use plugship_core::{
    Expand, PluginDescriptor, Publisher, ReleaseOptions, ReleaseOutcome, StoreClient, UploadPlan,
    resolve_conflict,
};
use plugship_store::MarketplaceClient;

use crate::cli::Cli;

/// Runs the publish workflow.
pub fn run(cli: Cli) -> Result<()> {
    // Create a tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().context("failed to create async runtime")?;
    rt.block_on(run_async(cli))
}

async fn run_async(cli: Cli) -> Result<()> {
    let config = load_config_or_default()?;

    // Credentials fail fast, before any archive or network work.
    let Some(username) = cli.username.clone().or_else(|| config.auth.username.clone()) else {
        bail!("no marketplace username provided (use --username, PLUGSHIP_USERNAME, or plugship.toml)");
    };
    let Some(password) = cli.password.clone() else {
        bail!("no marketplace password provided (use --password or PLUGSHIP_PASSWORD)");
    };

    let descriptor = read_descriptor(&cli.archive)
        .with_context(|| format!("failed to read plugin archive {}", cli.archive.display()))?;

    println!("Publishing {} {}\n", descriptor.name, descriptor.version);

    let store_url = cli
        .store_url
        .clone()
        .unwrap_or_else(|| config.store.url.clone());
    let timeout = Duration::from_secs(config.store.timeout_secs);
    let mut client = MarketplaceClient::new(store_url, timeout);

    let bar = spinner(format!("signing in as {username}"));
    let signed_in = client.authenticate(&username, &password).await;
    bar.finish_and_clear();
    signed_in.context("authentication failed")?;

    if cli.dry_run {
        return preview(&client, &descriptor, cli.force).await;
    }

    let options = ReleaseOptions {
        force: cli.force,
        request_review: !cli.skip_release_request,
    };

    let publisher = Publisher::new(client);
    let bar = spinner(format!(
        "publishing {} {}",
        descriptor.name, descriptor.version
    ));
    let report = publisher.publish(&descriptor, &cli.archive, &options).await;
    bar.finish_and_clear();
    let report = report?;

    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    if !report.warnings.is_empty() {
        println!();
    }

    match report.outcome {
        ReleaseOutcome::Published { name, version } => {
            println!("Published {name} {version}!");
        }
        ReleaseOutcome::AwaitingManualRelease { name, version } => {
            println!("Uploaded {name} {version} without a review request.");
            println!("\nNext steps:");
            println!("  release the binary from the store dashboard when ready");
        }
    }

    Ok(())
}

/// Shows the intended upload plan without mutating the store.
async fn preview<C: StoreClient>(store: &C, descriptor: &PluginDescriptor, force: bool) -> Result<()> {
    let plugin = store
        .find_plugin(&descriptor.name, &[Expand::Binaries])
        .await?
        .with_context(|| format!("plugin not found in the store: {}", descriptor.name))?;

    let plan = resolve_conflict(&plugin.binaries, &plugin.name, &descriptor.version, force)?;
    match plan {
        UploadPlan::Fresh => {
            println!(
                "Would upload a new binary for {} {}",
                plugin.name, descriptor.version
            );
        }
        UploadPlan::Replace(binary) => {
            println!(
                "Would replace the content of binary {} (version {})",
                binary.id, binary.version
            );
        }
    }

    println!("\nDry run completed. No changes were made.");
    Ok(())
}

fn load_config_or_default() -> Result<Config> {
    match find_and_load_config() {
        Ok(config) => Ok(config),
        Err(ConfigError::NotFound(_)) => Ok(Config::default()),
        Err(err) => Err(err).context("failed to load configuration"),
    }
}

fn spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("valid spinner template"),
    );
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
