use crate::agents::declaration::{Declaration, DeclarationKind};
use crate::golang::GoVersion;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static GO_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\x{FEFF}?[ \t]*go[ \t]+(?P<version>\d+\.\d+(?:\.\d+)?)")
        .expect("valid go directive regex")
});

static BASE_IMAGE_FULL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\x{FEFF}?[ \t]*(?i:FROM)[ \t]+(?:--\S+[ \t]+)*(?:\S*/)?golang:(?P<version>\d+\.\d+\.\d+)")
        .expect("valid base image regex")
});

static BASE_IMAGE_SHORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\x{FEFF}?[ \t]*(?i:FROM)[ \t]+(?:--\S+[ \t]+)*(?:\S*/)?golang:(?P<version>\d+\.\d+)")
        .expect("valid base image regex")
});

/// Locates Go version declarations in raw file content.
pub struct VersionExtractor;

impl VersionExtractor {
    /// First declaration of `kind` in `content`, if any.
    pub fn extract(content: &str, kind: DeclarationKind) -> Option<Declaration> {
        Self::extract_all(content, kind).into_iter().next()
    }

    /// Every declaration of `kind`, one per line at most, in file order.
    pub fn extract_all(content: &str, kind: DeclarationKind) -> Vec<Declaration> {
        let mut declarations = Vec::new();
        let mut offset = 0;

        for (index, line) in content.split_inclusive('\n').enumerate() {
            if let Some(span) = locate_in_line(line, kind) {
                let raw = &line[span.clone()];
                if let Some(version) = GoVersion::parse(raw) {
                    declarations.push(Declaration {
                        kind,
                        version,
                        raw: raw.to_string(),
                        span: offset + span.start..offset + span.end,
                        line: index + 1,
                    });
                }
            }
            offset += line.len();
        }

        declarations
    }
}

/// Byte range of the version inside a single line.
///
/// For base images the three-component form is tried first, so `1.21.3` is
/// never taken as `1.21` followed by `.3`.
pub(crate) fn locate_in_line(line: &str, kind: DeclarationKind) -> Option<Range<usize>> {
    match kind {
        DeclarationKind::ModuleDirective => match_version(&GO_DIRECTIVE, line),
        DeclarationKind::BaseImage => match_version(&BASE_IMAGE_FULL, line)
            .or_else(|| match_version(&BASE_IMAGE_SHORT, line)),
    }
}

fn match_version(pattern: &Regex, line: &str) -> Option<Range<usize>> {
    let version = pattern.captures(line)?.name("version")?;
    if !ends_at_boundary(line, version.end()) {
        return None;
    }
    Some(version.range())
}

// `1.21rc1` or `1.21.x` must not be read as `1.21`.
fn ends_at_boundary(line: &str, end: usize) -> bool {
    line[end..]
        .chars()
        .next()
        .is_none_or(|c| !(c.is_ascii_alphanumeric() || c == '.' || c == '_'))
}
