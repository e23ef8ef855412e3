use crate::golang::{GoVersion, Precision};
use std::fmt;
use std::ops::Range;
use std::path::PathBuf;

/// The two places a Go toolchain version is pinned in a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// `go 1.21.3` in a `go.mod`
    ModuleDirective,
    /// `FROM golang:1.21.3` in a `Dockerfile`
    BaseImage,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationKind::ModuleDirective => write!(f, "go directive"),
            DeclarationKind::BaseImage => write!(f, "golang base image"),
        }
    }
}

/// A version occurrence located inside a file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub version: GoVersion,
    /// Version text exactly as written
    pub raw: String,
    /// Byte range of `raw` within the whole content
    pub span: Range<usize>,
    /// 1-based
    pub line: usize,
}

impl Declaration {
    pub fn precision(&self) -> Precision {
        self.version.precision()
    }
}

/// A file found by the tree walker and the kind of declaration it should hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTarget {
    pub path: PathBuf,
    pub kind: DeclarationKind,
}

impl FileTarget {
    pub fn new(path: impl Into<PathBuf>, kind: DeclarationKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}
