use crate::error::{Result, UpdaterError};
use std::path::{Path, PathBuf};

const SYSTEM_DIRS: &[&str] = &["/etc", "/sys", "/proc", "/dev", "/boot"];

/// Guards the project root before any go.mod or Dockerfile below it is rewritten.
pub struct PathValidator;

impl PathValidator {
    /// Canonical form of `path`, which must be a directory that is neither
    /// the filesystem root nor inside a system directory.
    pub fn validate_project_path(path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();

        let root = path.canonicalize().map_err(|e| {
            UpdaterError::ProjectValidation(format!(
                "cannot resolve project root '{}': {e}",
                path.display()
            ))
        })?;

        if !root.is_dir() {
            return Err(UpdaterError::ProjectValidation(format!(
                "project root '{}' is not a directory",
                root.display()
            )));
        }

        if root.parent().is_none() {
            return Err(UpdaterError::ProjectValidation(
                "refusing to rewrite Go files across the whole filesystem".to_string(),
            ));
        }

        if let Some(system_dir) = system_dir_containing(&root) {
            return Err(UpdaterError::ProjectValidation(format!(
                "project root '{}' lies inside system directory '{system_dir}'",
                root.display()
            )));
        }

        Ok(root)
    }
}

fn system_dir_containing(root: &Path) -> Option<&'static str> {
    SYSTEM_DIRS.iter().copied().find(|dir| {
        let dir_path = Path::new(dir);
        root.starts_with(dir_path)
            || dir_path
                .canonicalize()
                .is_ok_and(|resolved| root.starts_with(resolved))
    })
}
