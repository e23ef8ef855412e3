use crate::config::UpdaterConfig;
use crate::error::{Result, UpdaterError};
use crate::golang::version::ReleaseVersion;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info};

const USER_AGENT: &str = concat!("go-version-updater/", env!("CARGO_PKG_VERSION"));

/// Source of the latest published Go release.
pub trait ReleaseSource {
    fn latest(&self) -> Result<ReleaseVersion>;
}

/// Client for the go.dev download feed
pub struct GoReleaseFeed {
    client: Client,
    feed_url: String,
}

impl GoReleaseFeed {
    pub fn new(config: &UpdaterConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| UpdaterError::InvalidConfig(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            feed_url: config.feed_url.clone(),
        })
    }

    fn fetch_releases(&self) -> Result<Vec<Release>> {
        debug!(url = %self.feed_url, "fetching Go release feed");

        let fetch_failure = |source| UpdaterError::FetchFailure {
            url: self.feed_url.clone(),
            source,
        };

        let response = self
            .client
            .get(&self.feed_url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .map_err(fetch_failure)?;

        let body = response.text().map_err(fetch_failure)?;

        serde_json::from_str(&body).map_err(|e| {
            UpdaterError::UnparsableRemoteVersion(format!("invalid release feed payload: {e}"))
        })
    }
}

impl ReleaseSource for GoReleaseFeed {
    fn latest(&self) -> Result<ReleaseVersion> {
        let releases = self.fetch_releases()?;
        let version = select_latest_stable(&releases)?;
        info!(%version, "latest Go release");
        Ok(version)
    }
}

/// Pick the first stable entry of a newest-first feed and parse its tag.
fn select_latest_stable(releases: &[Release]) -> Result<ReleaseVersion> {
    let release = releases
        .iter()
        .find(|release| release.stable)
        .ok_or_else(|| {
            UpdaterError::UnparsableRemoteVersion("release feed lists no stable release".into())
        })?;

    debug!(tag = %release.version, "newest stable release tag");

    ReleaseVersion::parse_tag(&release.version)
        .ok_or_else(|| UpdaterError::UnparsableRemoteVersion(release.version.clone()))
}

#[derive(Debug, Deserialize)]
struct Release {
    version: String,
    #[serde(default = "default_stable")]
    stable: bool,
}

fn default_stable() -> bool {
    true
}
