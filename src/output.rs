//! Writing the generated artifact.
//!
//! The file is staged in a temporary sibling and renamed into place, so a
//! failed run leaves the previous artifact untouched.

use crate::error::{MatrixError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Default output path, relative to the repository root.
pub const DEFAULT_OUTPUT_PATH: &str = "docs/_includes/matrix.html";

/// Default path for the JSON rendition, next to the HTML fragment.
pub const DEFAULT_JSON_OUTPUT_PATH: &str = "docs/_includes/matrix.json";

pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let write_err = |source| MatrixError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(write_err)?;

    let mut staged = NamedTempFile::new_in(&parent).map_err(write_err)?;
    debug!(staged = %staged.path().display(), "staging matrix output");
    staged.write_all(contents.as_bytes()).map_err(write_err)?;
    staged.as_file().sync_all().map_err(write_err)?;
    staged
        .persist(path)
        .map_err(|err| write_err(err.error))?;

    info!(path = %path.display(), bytes = contents.len(), "wrote feature matrix");
    Ok(())
}

/// Fails with `Stale` unless `path` already holds exactly `contents`.
pub fn check_up_to_date(path: &Path, contents: &str) -> Result<()> {
    match fs::read_to_string(path) {
        Ok(existing) if existing == contents => {
            info!(path = %path.display(), "feature matrix is up to date");
            Ok(())
        }
        Ok(_) => Err(MatrixError::Stale {
            path: path.to_path_buf(),
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(MatrixError::Stale {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(MatrixError::Write {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("docs/_includes/matrix.html");
        write_atomic(&target, "<table></table>\n").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "<table></table>\n");
    }

    #[test]
    fn replaces_existing_file_without_leftovers() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("matrix.html");
        fs::write(&target, "old").unwrap();
        write_atomic(&target, "new").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
        let entries = fs::read_dir(temp.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn check_reports_missing_and_stale_files() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("matrix.html");
        assert!(matches!(
            check_up_to_date(&target, "x"),
            Err(MatrixError::Stale { .. })
        ));
        fs::write(&target, "x").unwrap();
        assert!(check_up_to_date(&target, "x").is_ok());
        assert!(matches!(
            check_up_to_date(&target, "y"),
            Err(MatrixError::Stale { .. })
        ));
    }

    #[test]
    fn parent_that_is_a_file_is_a_write_error() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("docs");
        fs::write(&blocker, "not a directory").unwrap();
        let result = write_atomic(&blocker.join("matrix.html"), "x");
        assert!(matches!(result, Err(MatrixError::Write { .. })));
    }
}
