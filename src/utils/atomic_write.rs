use crate::error::{Result, UpdaterError};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` with `contents` via a temp file in the same directory and
/// a rename. Either the new content lands completely or the original file
/// is left as it was.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let write_error = |source| UpdaterError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_error)?;
    tmp.write_all(contents.as_bytes()).map_err(write_error)?;
    tmp.as_file().sync_all().map_err(write_error)?;

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), metadata.permissions()).map_err(write_error)?;
    }

    // A failed persist drops the temp file, which deletes it.
    tmp.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn replaces_existing_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("go.mod");
        fs::write(&path, "module x\n\ngo 1.2.3\n").unwrap();

        write_atomic(&path, "module x\n\ngo 1.19.3\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "module x\n\ngo 1.19.3\n");
    }

    #[test]
    fn leaves_no_temp_files_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Dockerfile");
        fs::write(&path, "FROM golang:1.20\n").unwrap();

        write_atomic(&path, "FROM golang:1.21\n").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn missing_directory_is_write_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("go.mod");
        let err = write_atomic(&path, "go 1.21\n").unwrap_err();
        assert!(matches!(err, UpdaterError::Write { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn keeps_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("go.mod");
        fs::write(&path, "go 1.20\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_atomic(&path, "go 1.21\n").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }
}
