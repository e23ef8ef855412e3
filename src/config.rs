use crate::error::{Result, UpdaterError};
use std::time::Duration;
use url::Url;

/// Official Go download feed, newest release first.
pub const DEFAULT_FEED_URL: &str = "https://go.dev/dl/?mode=json";
pub const DEFAULT_MANIFEST_FILE: &str = "go.mod";
pub const DEFAULT_BUILD_FILE: &str = "Dockerfile";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// What to do when no `go.mod` can be found under the project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MissingManifestPolicy {
    /// Log and carry on with build files only
    #[default]
    Skip,
    /// Abort the run
    Fail,
}

/// Runtime configuration shared by the feed client, the tree walker and the workflow.
#[derive(Debug, Clone)]
pub struct UpdaterConfig {
    pub feed_url: String,
    pub manifest_file_name: String,
    pub build_file_name: String,
    pub missing_manifest: MissingManifestPolicy,
    pub request_timeout: Duration,
    /// Directory names never descended into
    pub excluded_dirs: Vec<String>,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            manifest_file_name: DEFAULT_MANIFEST_FILE.to_string(),
            build_file_name: DEFAULT_BUILD_FILE.to_string(),
            missing_manifest: MissingManifestPolicy::default(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            excluded_dirs: vec![".git".to_string()],
        }
    }
}

impl UpdaterConfig {
    pub fn with_missing_manifest(mut self, policy: MissingManifestPolicy) -> Self {
        self.missing_manifest = policy;
        self
    }

    pub fn with_feed_url(mut self, feed_url: impl Into<String>) -> Self {
        self.feed_url = feed_url.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_feed_url(&self.feed_url)?;

        for (label, name) in [
            ("manifest", &self.manifest_file_name),
            ("build file", &self.build_file_name),
        ] {
            if name.is_empty() || name.contains(['/', '\\']) {
                return Err(UpdaterError::InvalidConfig(format!(
                    "{label} name must be a plain file name, got '{name}'"
                )));
            }
        }

        Ok(())
    }
}

fn validate_feed_url(feed_url: &str) -> Result<()> {
    let parsed = Url::parse(feed_url)
        .map_err(|e| UpdaterError::InvalidConfig(format!("Invalid feed URL '{feed_url}': {e}")))?;

    match parsed.scheme() {
        "https" | "http" => Ok(()),
        scheme => Err(UpdaterError::InvalidConfig(format!(
            "Unsupported feed URL scheme: {scheme}"
        ))),
    }
}
