use crate::agents::declaration::{Declaration, DeclarationKind, FileTarget};
use crate::agents::report::UpdateReport;
use crate::agents::version_extractor::VersionExtractor;
use crate::config::{MissingManifestPolicy, UpdaterConfig};
use crate::error::{Result, UpdaterError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

/// A target whose content has been read and whose declarations are located,
/// ready to be rewritten.
#[derive(Debug, Clone)]
pub struct PlannedFile {
    pub target: FileTarget,
    pub content: String,
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Default)]
struct Discovered {
    targets: Vec<FileTarget>,
    symlinks: Vec<PathBuf>,
}

/// TreeWalker finds version-bearing files below a project root
pub struct TreeWalker<'a> {
    config: &'a UpdaterConfig,
}

impl<'a> TreeWalker<'a> {
    pub fn new(config: &'a UpdaterConfig) -> Self {
        Self { config }
    }

    /// Every regular file under `root` whose name is exactly `file_name`.
    pub fn walk(&self, root: &Path, file_name: &str, kind: DeclarationKind) -> Vec<FileTarget> {
        self.discover(root, file_name, kind).targets
    }

    fn discover(&self, root: &Path, file_name: &str, kind: DeclarationKind) -> Discovered {
        let mut found = Discovered::default();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("skipping unreadable entry: {e}");
                    continue;
                }
            };

            if entry.file_name() != file_name {
                continue;
            }
            if entry.file_type().is_file() {
                found.targets.push(FileTarget::new(entry.path(), kind));
            } else if entry.path_is_symlink() {
                found.symlinks.push(entry.into_path());
            }
        }

        debug!(
            root = %root.display(),
            count = found.targets.len(),
            symlinks = found.symlinks.len(),
            "found {file_name} files"
        );
        found
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.config.excluded_dirs.iter().any(|dir| dir == name))
    }

    /// Read and locate every build file declaration. Build files that are
    /// missing, unreadable or carry no golang base image are skipped.
    pub fn plan_build_files(&self, root: &Path, report: &mut UpdateReport) -> Vec<PlannedFile> {
        let Discovered { targets, symlinks } =
            self.discover(root, &self.config.build_file_name, DeclarationKind::BaseImage);
        record_symlinks(&symlinks, report);
        let mut planned = Vec::with_capacity(targets.len());

        for target in targets {
            let content = match read_target(&target.path) {
                Ok(content) => content,
                Err(e) => {
                    debug!("skipping build file: {e}");
                    report.record_skip(&target.path, e.to_string());
                    continue;
                }
            };

            let declarations = VersionExtractor::extract_all(&content, target.kind);
            if declarations.is_empty() {
                debug!(path = %target.path.display(), "no golang base image");
                report.record_skip(&target.path, "no golang base image");
                continue;
            }

            planned.push(PlannedFile {
                target,
                content,
                declarations,
            });
        }

        planned
    }

    /// Read and validate every manifest. A manifest without a `go` directive
    /// aborts the whole plan; absence follows the configured policy.
    pub fn plan_manifests(&self, root: &Path, report: &mut UpdateReport) -> Result<Vec<PlannedFile>> {
        let Discovered { targets, symlinks } = self.discover(
            root,
            &self.config.manifest_file_name,
            DeclarationKind::ModuleDirective,
        );
        record_symlinks(&symlinks, report);

        if targets.is_empty() && symlinks.is_empty() {
            self.handle_missing_manifest(&root.join(&self.config.manifest_file_name), report)?;
            return Ok(Vec::new());
        }

        let mut planned = Vec::with_capacity(targets.len());

        for target in targets {
            let content = match read_target(&target.path) {
                Ok(content) => content,
                Err(UpdaterError::FileNotFound(path)) => {
                    self.handle_missing_manifest(&path, report)?;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let declarations = VersionExtractor::extract_all(&content, target.kind);
            if declarations.is_empty() {
                return Err(UpdaterError::MalformedManifest(target.path));
            }

            debug!(
                path = %target.path.display(),
                version = %declarations[0].version,
                precision = %declarations[0].precision(),
                "found go directive"
            );

            planned.push(PlannedFile {
                target,
                content,
                declarations,
            });
        }

        Ok(planned)
    }

    fn handle_missing_manifest(&self, path: &Path, report: &mut UpdateReport) -> Result<()> {
        match self.config.missing_manifest {
            MissingManifestPolicy::Fail => Err(UpdaterError::MissingManifest(path.to_path_buf())),
            MissingManifestPolicy::Skip => {
                info!(path = %path.display(), "manifest not found, skipping");
                report.record_skip(path, "manifest not found");
                Ok(())
            }
        }
    }
}

fn record_symlinks(symlinks: &[PathBuf], report: &mut UpdateReport) {
    for path in symlinks {
        info!(path = %path.display(), "symbolic link not followed, skipping");
        report.record_skip(path, "symbolic link, not followed");
    }
}

fn read_target(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => UpdaterError::FileNotFound(path.to_path_buf()),
        _ => UpdaterError::Read {
            path: path.to_path_buf(),
            source,
        },
    })
}
