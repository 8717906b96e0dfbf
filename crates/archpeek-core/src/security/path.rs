//! Staging containment check for entry paths.

use std::path::Path;

use crate::Result;
use crate::types::SafePath;
use crate::types::StagingDir;

/// Validates that a sanitized entry path can be written under `staging`.
///
/// Raw entry bytes are converted to a platform path and handed to
/// [`SafePath::validate`]. On Unix the bytes are used as-is; elsewhere they
/// are decoded lossily.
///
/// # Errors
///
/// - `InspectionError::PathTraversal` for `..`, absolute paths or drive
///   prefixes
/// - `InspectionError::SecurityViolation` for NUL bytes or excessive depth
///
/// # Examples
///
/// ```no_run
/// use archpeek_core::StagingDir;
/// use archpeek_core::security::validate_entry_path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let staging = StagingDir::new("/tmp")?;
///
/// assert!(validate_entry_path(b"docs/readme.txt", &staging, 32).is_ok());
/// assert!(validate_entry_path(b"../etc/passwd", &staging, 32).is_err());
/// # Ok(())
/// # }
/// ```
pub fn validate_entry_path(
    path: &[u8],
    staging: &StagingDir,
    max_depth: usize,
) -> Result<SafePath> {
    SafePath::validate(&bytes_to_path(path), staging, max_depth)
}

#[cfg(unix)]
fn bytes_to_path(bytes: &[u8]) -> std::borrow::Cow<'_, Path> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    std::borrow::Cow::Borrowed(Path::new(OsStr::from_bytes(bytes)))
}

#[cfg(not(unix))]
fn bytes_to_path(bytes: &[u8]) -> std::borrow::Cow<'_, Path> {
    let text = String::from_utf8_lossy(bytes).replace('\\', "/");
    std::borrow::Cow::Owned(std::path::PathBuf::from(text))
}
