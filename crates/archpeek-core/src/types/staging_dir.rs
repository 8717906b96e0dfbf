//! Validated staging directory type.

use crate::InspectionError;
use crate::Result;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

/// A validated directory under which transient entry files are written.
///
/// This type represents a directory that has been validated to:
/// - Exist on the filesystem
/// - Be a directory (not a file)
/// - Not be marked read-only
/// - Be represented as an absolute canonical path
///
/// All entry paths are checked against the canonical path before anything is
/// written (see [`SafePath`](super::SafePath)).
///
/// # Examples
///
/// ```no_run
/// use archpeek_core::StagingDir;
/// use std::path::PathBuf;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let staging = StagingDir::new(PathBuf::from("/tmp/staging"))?;
/// println!("Staging under: {}", staging.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingDir(PathBuf);

impl StagingDir {
    /// Creates a new `StagingDir` after validating the path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path does not exist
    /// - The path exists but is not a directory
    /// - The path cannot be canonicalized
    /// - The directory is read-only
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(InspectionError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("staging directory does not exist: {}", path.display()),
            )));
        }

        if !path.is_dir() {
            return Err(InspectionError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("path is not a directory: {}", path.display()),
            )));
        }

        let canonical = path.canonicalize().map_err(|e| {
            InspectionError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to canonicalize path {}: {}", path.display(), e),
            ))
        })?;

        if std::fs::metadata(&canonical)?.permissions().readonly() {
            return Err(InspectionError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("staging directory is not writable: {}", canonical.display()),
            )));
        }

        Ok(Self(canonical))
    }

    /// Returns the staging directory for an inspected file: the configured
    /// directory if any, otherwise the file's parent directory.
    pub fn for_input(configured: Option<&Path>, input: &Path) -> Result<Self> {
        match configured {
            Some(dir) => Self::new(dir),
            None => {
                let parent = input
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or_else(|| Path::new("."));
                Self::new(parent)
            }
        }
    }

    /// Creates a private scratch directory inside this staging directory.
    ///
    /// The scratch directory and anything left in it are removed when the
    /// returned [`TempDir`] is dropped.
    pub fn scratch(&self) -> Result<TempDir> {
        Ok(tempfile::Builder::new()
            .prefix(".archpeek-")
            .tempdir_in(&self.0)?)
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins a `SafePath` to this staging directory.
    #[inline]
    #[must_use]
    pub fn join(&self, safe_path: &super::SafePath) -> PathBuf {
        self.0.join(safe_path.as_path())
    }
}
