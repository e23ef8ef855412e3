use clap::Parser;
use colored::Colorize;
use go_version_updater::cli::Cli;
use go_version_updater::config::UpdaterConfig;
use go_version_updater::{logging, workflow};
use std::process;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = UpdaterConfig::default()
        .with_feed_url(cli.feed_url)
        .with_missing_manifest(cli.missing_manifest);

    if let Err(e) = workflow::execute(&config, &cli.path) {
        tracing::debug!(error = ?e, "update failed");
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
