//! Error types for archive inspection.
//!
//! These errors never cross [`Inspection::process`](crate::Inspection::process);
//! the controller downgrades every one of them to an
//! [`ErrorRecord`](crate::ErrorRecord). They surface directly only from the
//! lower-level building blocks (readers, [`StagingDir`](crate::StagingDir),
//! [`SafePath`](crate::SafePath)).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `InspectionError`.
pub type Result<T> = std::result::Result<T, InspectionError>;

/// Errors that can occur while traversing an archive.
#[derive(Error, Debug)]
pub enum InspectionError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive is corrupted or could not be parsed.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Declared media type could not be split into `type/subtype`.
    #[error("invalid declared media type: {media_type:?}")]
    InvalidMediaType {
        /// The declared media type as received.
        media_type: String,
    },

    /// Entry path resolves outside the staging directory.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The sanitized entry path that attempted traversal.
        path: PathBuf,
    },

    /// Entry rejected by a security rule other than traversal.
    #[error("operation denied by security policy: {reason}")]
    SecurityViolation {
        /// Reason for the violation.
        reason: String,
    },

    /// A transient file was already present where an entry was about to be
    /// materialized.
    #[error("transient target already exists: {path}")]
    TransientCollision {
        /// The transient path.
        path: PathBuf,
    },

    /// Writing an entry did not produce the expected transient file.
    #[error("extracting {format} entry did not produce {path}")]
    TransientMissing {
        /// Reader format name.
        format: &'static str,
        /// The transient path that should exist.
        path: PathBuf,
    },
}

impl InspectionError {
    /// Returns `true` if this error rejects a single entry on security
    /// grounds rather than failing the whole traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use archpeek_core::InspectionError;
    /// use std::path::PathBuf;
    ///
    /// let err = InspectionError::PathTraversal {
    ///     path: PathBuf::from("../etc/passwd"),
    /// };
    /// assert!(err.is_security_violation());
    ///
    /// let err = InspectionError::InvalidArchive("truncated header".into());
    /// assert!(!err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(
            self,
            Self::PathTraversal { .. } | Self::SecurityViolation { .. }
        )
    }

    /// Returns a context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use archpeek_core::InspectionError;
    ///
    /// let err = InspectionError::InvalidArchive("bad header".to_string());
    /// assert_eq!(err.context(), Some("bad header"));
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidArchive(msg) => Some(msg),
            Self::SecurityViolation { reason } => Some(reason),
            Self::InvalidMediaType { media_type } => Some(media_type),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for InspectionError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io) => Self::Io(io),
            other => Self::InvalidArchive(other.to_string()),
        }
    }
}

impl From<sevenz_rust2::Error> for InspectionError {
    fn from(err: sevenz_rust2::Error) -> Self {
        Self::InvalidArchive(format!("7z error: {err}"))
    }
}
