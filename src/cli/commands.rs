use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "dns-digest")]
#[command(about = "Post a digest of category-tagged RSS items to a Slack webhook")]
#[command(version)]
pub struct Cli {
    /// Dry run - print the Slack payload instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Category tag to select (overrides DIGEST_CATEGORY)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Read configuration from this .env file instead of the environment
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,
}
