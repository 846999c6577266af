//! CLI definition.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::commands;

/// Publish plugin binaries to a marketplace.
#[derive(Debug, Parser)]
#[command(name = "plugship")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the plugin archive to publish
    pub archive: PathBuf,

    /// Marketplace username
    #[arg(short, long, env = "PLUGSHIP_USERNAME")]
    pub username: Option<String>,

    /// Marketplace password
    #[arg(short, long, env = "PLUGSHIP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Upload the binary without requesting a review
    #[arg(long)]
    pub skip_release_request: bool,

    /// Replace an existing binary carrying the same version
    #[arg(short, long)]
    pub force: bool,

    /// Marketplace URL (overrides configuration)
    #[arg(long, env = "PLUGSHIP_STORE_URL")]
    pub store_url: Option<String>,

    /// Show the intended upload plan without touching the store
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Runs the publish workflow.
    pub fn run(self) -> Result<()> {
        commands::publish::run(self)
    }
}
