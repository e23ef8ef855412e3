pub mod release_feed;
pub mod version;

pub use release_feed::{GoReleaseFeed, ReleaseSource};
pub use version::{GoVersion, Precision, ReleaseVersion};
