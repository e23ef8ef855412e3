use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static RELEASE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^go(\d+)\.(\d+)\.(\d+)").expect("valid release tag regex"));

/// How many components a declaration spells out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// `1.21`
    MajorMinor,
    /// `1.21.3`
    MajorMinorPatch,
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::MajorMinor => write!(f, "major.minor"),
            Precision::MajorMinorPatch => write!(f, "major.minor.patch"),
        }
    }
}

/// A Go version as declared in a project file. The patch is present only
/// when the declaration spelled it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: Option<u64>,
}

impl GoVersion {
    pub fn new(major: u64, minor: u64, patch: Option<u64>) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse `X.Y` or `X.Y.Z`. Anything else, including pre-release
    /// suffixes, yields `None`.
    pub fn parse(version: &str) -> Option<Self> {
        let mut parts = version.split('.');
        let major = parse_component(parts.next()?)?;
        let minor = parse_component(parts.next()?)?;
        let patch = match parts.next() {
            Some(part) => Some(parse_component(part)?),
            None => None,
        };

        if parts.next().is_some() {
            return None;
        }

        Some(Self::new(major, minor, patch))
    }

    pub fn precision(&self) -> Precision {
        if self.patch.is_some() {
            Precision::MajorMinorPatch
        } else {
            Precision::MajorMinor
        }
    }
}

impl fmt::Display for GoVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.patch {
            Some(patch) => write!(f, "{}.{}.{}", self.major, self.minor, patch),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

fn parse_component(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// The latest published release. Unlike [`GoVersion`] the patch is
/// mandatory, so a partially parsed tag can never reach a rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl ReleaseVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a feed identifier such as `go1.21.3`. Only the leading
    /// `go<major>.<minor>.<patch>` is considered; trailing content is ignored.
    pub fn parse_tag(tag: &str) -> Option<Self> {
        let caps = RELEASE_TAG.captures(tag)?;
        let major = caps.get(1)?.as_str().parse().ok()?;
        let minor = caps.get(2)?.as_str().parse().ok()?;
        let patch = caps.get(3)?.as_str().parse().ok()?;
        Some(Self::new(major, minor, patch))
    }

    /// Render at the precision of the declaration being replaced.
    pub fn render(&self, precision: Precision) -> String {
        match precision {
            Precision::MajorMinor => format!("{}.{}", self.major, self.minor),
            Precision::MajorMinorPatch => {
                format!("{}.{}.{}", self.major, self.minor, self.patch)
            }
        }
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(Precision::MajorMinorPatch))
    }
}
