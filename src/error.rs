use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpdaterError {
    #[error("Failed to fetch Go releases from {url}: {source}")]
    FetchFailure {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unparsable Go release version: {0}")]
    UnparsableRemoteVersion(String),

    #[error("Manifest not found: {}", .0.display())]
    MissingManifest(PathBuf),

    #[error("no golang version defined in file: {}", .0.display())]
    MalformedManifest(PathBuf),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Project validation failed: {0}")]
    ProjectValidation(String),
}

pub type Result<T> = std::result::Result<T, UpdaterError>;
