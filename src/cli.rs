use crate::config::{DEFAULT_FEED_URL, MissingManifestPolicy};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "go-version-updater",
    about = "Update go.mod and Dockerfile Go versions to the latest Go release",
    version,
    author
)]
pub struct Cli {
    /// Path to the project directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub path: String,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,

    /// What to do when no go.mod is found
    #[arg(long, value_enum, default_value_t = MissingManifestPolicy::Skip)]
    pub missing_manifest: MissingManifestPolicy,

    /// Release feed to query, for mirrors of go.dev
    #[arg(long, value_name = "URL", default_value = DEFAULT_FEED_URL)]
    pub feed_url: String,
}
