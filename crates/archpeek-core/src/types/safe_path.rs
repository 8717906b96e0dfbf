//! Validated safe path type for transient entry writes.

use crate::InspectionError;
use crate::Result;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use super::StagingDir;

/// A sanitized entry path that is safe to materialize under a staging
/// directory.
///
/// `SafePath` represents a path that has been validated to not contain:
/// - Parent directory traversal (`..`)
/// - Null bytes
/// - Absolute paths, root or drive prefixes
/// - More segments than the configured maximum depth
///
/// # Security Properties
///
/// - Can ONLY be constructed through validation
/// - NO `From<PathBuf>` implementation
/// - Always resolves within the staging directory
/// - Normalized to remove `.` components
///
/// # Examples
///
/// ```no_run
/// use archpeek_core::SafePath;
/// use archpeek_core::StagingDir;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let staging = StagingDir::new("/tmp")?;
///
/// let safe = SafePath::validate(Path::new("docs/readme.txt"), &staging, 32)?;
/// assert!(SafePath::validate(Path::new("../etc/passwd"), &staging, 32).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafePath(PathBuf);

impl SafePath {
    /// Validates and constructs a `SafePath`.
    ///
    /// # Validation Steps
    ///
    /// 1. Reject null bytes
    /// 2. Reject `..`, root and prefix components
    /// 3. Drop `.` components
    /// 4. Enforce the depth limit
    /// 5. Verify the joined path (and its existing parent, after symlink
    ///    resolution) stays under the staging directory
    ///
    /// # Errors
    ///
    /// - `InspectionError::PathTraversal` for `..`, absolute paths, empty
    ///   paths or a resolution that escapes the staging directory
    /// - `InspectionError::SecurityViolation` for null bytes or excessive
    ///   depth
    pub fn validate(path: &Path, staging: &StagingDir, max_depth: usize) -> Result<Self> {
        if has_null_bytes(path) {
            return Err(InspectionError::SecurityViolation {
                reason: format!("path contains null bytes: {}", path.display()),
            });
        }

        let mut depth = 0;
        let mut normalized = PathBuf::new();

        for component in path.components() {
            match component {
                Component::Normal(comp) => {
                    depth += 1;
                    normalized.push(comp);
                }
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(InspectionError::PathTraversal {
                        path: path.to_path_buf(),
                    });
                }
            }
        }

        if depth == 0 {
            return Err(InspectionError::PathTraversal {
                path: path.to_path_buf(),
            });
        }

        if depth > max_depth {
            return Err(InspectionError::SecurityViolation {
                reason: format!("path depth {depth} exceeds maximum {max_depth}"),
            });
        }

        let resolved = staging.as_path().join(&normalized);

        // A symlinked parent could redirect the write; resolve whatever
        // already exists.
        if let Some(parent) = resolved.parent() {
            match parent.canonicalize() {
                Ok(canonical_parent) => {
                    if !canonical_parent.starts_with(staging.as_path()) {
                        return Err(InspectionError::PathTraversal {
                            path: path.to_path_buf(),
                        });
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(InspectionError::Io(std::io::Error::new(
                        e.kind(),
                        format!("failed to canonicalize parent: {e}"),
                    )));
                }
            }
        }

        if !resolved.starts_with(staging.as_path()) {
            return Err(InspectionError::PathTraversal {
                path: path.to_path_buf(),
            });
        }

        Ok(Self(normalized))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

/// Checks if a path contains null bytes.
#[cfg(unix)]
fn has_null_bytes(path: &Path) -> bool {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().contains(&b'\0')
}

/// Checks if a path contains null bytes.
#[cfg(not(unix))]
fn has_null_bytes(path: &Path) -> bool {
    path.to_str().is_none_or(|s| s.contains('\0'))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_staging() -> (TempDir, StagingDir) {
        let temp = TempDir::new().expect("failed to create temp dir");
        let staging = StagingDir::new(temp.path().to_path_buf()).expect("failed to create staging");
        (temp, staging)
    }

    #[test]
    fn test_empty_path() {
        let (_temp, staging) = create_test_staging();
        let result = SafePath::validate(Path::new(""), &staging, 32);
        assert!(matches!(result, Err(InspectionError::PathTraversal { .. })));
    }

    #[test]
    fn test_valid_relative() {
        let (_temp, staging) = create_test_staging();
        let safe = SafePath::validate(Path::new("foo/bar/baz.txt"), &staging, 32)
            .expect("should be valid");
        assert_eq!(safe.as_path(), Path::new("foo/bar/baz.txt"));
        assert!(staging.join(&safe).starts_with(staging.as_path()));
    }

    #[test]
    fn test_current_dir_normalized() {
        let (_temp, staging) = create_test_staging();
        let safe = SafePath::validate(Path::new("./foo/./bar.txt"), &staging, 32)
            .expect("should be valid");
        assert_eq!(safe.as_path(), Path::new("foo/bar.txt"));
    }

    #[test]
    fn test_parent_traversal_rejected() {
        let (_temp, staging) = create_test_staging();
        for path in ["../etc/passwd", "foo/../../etc/passwd", "foo/.."] {
            let result = SafePath::validate(Path::new(path), &staging, 32);
            assert!(
                matches!(result, Err(InspectionError::PathTraversal { .. })),
                "should reject {path}"
            );
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_absolute_rejected() {
        let (_temp, staging) = create_test_staging();
        let result = SafePath::validate(Path::new("/etc/passwd"), &staging, 32);
        assert!(matches!(result, Err(InspectionError::PathTraversal { .. })));
    }

    #[test]
    fn test_depth_limit() {
        let (_temp, staging) = create_test_staging();
        let result = SafePath::validate(Path::new("a/b/c/d"), &staging, 3);
        assert!(matches!(
            result,
            Err(InspectionError::SecurityViolation { .. })
        ));
        assert!(SafePath::validate(Path::new("a/b/c"), &staging, 3).is_ok());
    }

    #[test]
    #[cfg(unix)]
    fn test_null_byte_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let (_temp, staging) = create_test_staging();
        let path = Path::new(OsStr::from_bytes(b"foo\0bar"));
        let result = SafePath::validate(path, &staging, 32);
        assert!(matches!(
            result,
            Err(InspectionError::SecurityViolation { .. })
        ));
    }

    #[test]
    #[cfg(unix)]
    fn test_symlinked_parent_rejected() {
        use std::os::unix::fs::symlink;

        let (temp, staging) = create_test_staging();
        let outside = TempDir::new().expect("failed to create outside dir");
        symlink(outside.path(), temp.path().join("escape")).unwrap();

        let result = SafePath::validate(Path::new("escape/file.txt"), &staging, 32);
        assert!(matches!(result, Err(InspectionError::PathTraversal { .. })));
    }
}
