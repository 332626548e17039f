//! Writing rendered members.
//!
//! The member is written as a plain UTF-8 file at the given path, replacing
//! any previous content. Writes are not atomic: an I/O failure part way
//! through can leave a truncated file behind.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Where a rendered member goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberTarget {
    path: PathBuf,
}

impl MemberTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates or overwrites the member with exactly `content`.
    pub fn write(&self, content: &str) -> Result<()> {
        let to_error = |source| Error::Write {
            path: self.path.clone(),
            source,
        };

        validate_path(&self.path).map_err(to_error)?;
        std::fs::write(&self.path, content).map_err(to_error)?;

        log::debug!("wrote {} bytes to {}", content.len(), self.path.display());
        Ok(())
    }
}

/// Validates that a file path's parent directory exists.
fn validate_path(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Parent directory does not exist: {}", parent.display()),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_member() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("IEASYS00");
        let target = MemberTarget::new(&file_path);

        target.write("CLPA,\nSYSNAME=SYSA\n").unwrap();

        let content = std::fs::read_to_string(file_path).unwrap();
        assert_eq!(content, "CLPA,\nSYSNAME=SYSA\n");
    }

    #[test]
    fn test_write_overwrites_longer_content() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("PROG00");
        std::fs::write(&file_path, "A much longer previous member body\nwith two lines\n").unwrap();

        MemberTarget::new(&file_path).write("SHORT").unwrap();

        assert_eq!(std::fs::read_to_string(file_path).unwrap(), "SHORT");
    }

    #[test]
    fn test_write_to_missing_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("nonexistent").join("LPALST00");
        let target = MemberTarget::new(&file_path);

        let err = target.write("x").unwrap_err();
        assert!(matches!(err, Error::Write { ref path, .. } if path == &file_path));
        let source = std::error::Error::source(&err).unwrap().to_string();
        assert!(source.contains("Parent directory does not exist"));
        assert!(!file_path.exists());
    }

    #[test]
    fn test_write_relative_path_without_parent() {
        assert!(validate_path(Path::new("IEASYS00")).is_ok());
    }
}
