use crate::agents::declaration::DeclarationKind;
use crate::golang::ReleaseVersion;
use std::path::{Path, PathBuf};

/// One substituted version inside a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub line: usize,
    pub old: String,
    pub new: String,
}

/// A file that was rewritten
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpdate {
    pub path: PathBuf,
    pub kind: DeclarationKind,
    pub replacements: Vec<Replacement>,
}

impl FileUpdate {
    /// True when every declaration already carried the latest version.
    pub fn is_unchanged(&self) -> bool {
        self.replacements.iter().all(|r| r.old == r.new)
    }
}

/// A file that was found but left alone, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Tracks what a run changed and what it passed over.
#[derive(Debug, Clone)]
pub struct UpdateReport {
    pub latest: ReleaseVersion,
    pub updated: Vec<FileUpdate>,
    pub skipped: Vec<SkippedFile>,
}

impl UpdateReport {
    pub fn new(latest: ReleaseVersion) -> Self {
        Self {
            latest,
            updated: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn record_update(&mut self, update: FileUpdate) {
        self.updated.push(update);
    }

    pub fn record_skip(&mut self, path: &Path, reason: impl Into<String>) {
        self.skipped.push(SkippedFile {
            path: path.to_path_buf(),
            reason: reason.into(),
        });
    }

    /// Check if no file was rewritten
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty()
    }

    pub fn updates_of(&self, kind: DeclarationKind) -> impl Iterator<Item = &FileUpdate> {
        self.updated.iter().filter(move |update| update.kind == kind)
    }

    /// Number of declarations whose version actually changed
    pub fn total_changes(&self) -> usize {
        self.updated
            .iter()
            .flat_map(|update| &update.replacements)
            .filter(|r| r.old != r.new)
            .count()
    }
}
