//! Format readers and dispatch by declared media type.

pub mod archive;
pub mod common;
pub mod default;
pub mod detect;
pub mod gzip;
pub mod sevenz;
pub mod tar;
pub mod traits;
pub mod zip;

use std::path::Path;

pub use archive::ArchiveReader;
pub use common::TraversalContext;
pub use default::DefaultReader;
pub use gzip::GzipReader;
pub use traits::FormatReader;
pub use traits::TraversalOutcome;
pub use zip::ZipReader;

use crate::InspectionError;
use crate::Result;
use crate::config::SubtypeClass;
use crate::config::SubtypeClasses;

/// One of the fixed set of readers, selected per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reader {
    /// Zip-like containers.
    Zip(ZipReader),
    /// Tar family and 7z.
    Archive(ArchiveReader),
    /// Gzip streams.
    Gzip(GzipReader),
    /// Everything else.
    Default(DefaultReader),
}

impl Reader {
    /// Picks the reader for a declared media type.
    ///
    /// The subtype (after the first `/`) is matched case-insensitively
    /// against `classes`; no match selects [`Reader::Default`].
    ///
    /// # Errors
    ///
    /// Returns `InspectionError::InvalidMediaType` if the media type has no
    /// `/` or an empty subtype.
    ///
    /// # Examples
    ///
    /// ```
    /// use archpeek_core::config::SubtypeClasses;
    /// use archpeek_core::formats::Reader;
    ///
    /// let classes = SubtypeClasses::default();
    /// assert!(matches!(Reader::for_media_type("application/zip", &classes), Ok(Reader::Zip(_))));
    /// assert!(matches!(Reader::for_media_type("text/plain", &classes), Ok(Reader::Default(_))));
    /// assert!(Reader::for_media_type("zip", &classes).is_err());
    /// ```
    pub fn for_media_type(media_type: &str, classes: &SubtypeClasses) -> Result<Self> {
        let subtype = subtype_of(media_type)?;
        Ok(Self::for_class(classes.classify(subtype)))
    }

    /// Returns the reader for a subtype class.
    #[must_use]
    pub const fn for_class(class: Option<SubtypeClass>) -> Self {
        match class {
            Some(SubtypeClass::Zip) => Self::Zip(ZipReader),
            Some(SubtypeClass::Archive) => Self::Archive(ArchiveReader),
            Some(SubtypeClass::Gzip) => Self::Gzip(GzipReader),
            None => Self::Default(DefaultReader),
        }
    }

    /// Returns the phrase used in failure reports, e.g. `extracting zip
    /// listing`.
    #[must_use]
    pub const fn failure_context(&self) -> &'static str {
        match self {
            Self::Zip(_) => "extracting zip listing",
            Self::Archive(_) => "extracting archive listing",
            Self::Gzip(_) => "extracting gzip listing",
            Self::Default(_) => "creating default peek",
        }
    }
}

impl FormatReader for Reader {
    fn traverse(&self, source: &Path, ctx: &mut TraversalContext<'_>) -> Result<TraversalOutcome> {
        match self {
            Self::Zip(r) => r.traverse(source, ctx),
            Self::Archive(r) => r.traverse(source, ctx),
            Self::Gzip(r) => r.traverse(source, ctx),
            Self::Default(r) => r.traverse(source, ctx),
        }
    }

    fn format_name(&self) -> &'static str {
        match self {
            Self::Zip(r) => r.format_name(),
            Self::Archive(r) => r.format_name(),
            Self::Gzip(r) => r.format_name(),
            Self::Default(r) => r.format_name(),
        }
    }
}

/// Extracts the subtype of a `type/subtype` media type.
///
/// Parameters after `;` are ignored.
///
/// # Errors
///
/// Returns `InspectionError::InvalidMediaType` if there is no `/` or the
/// subtype is empty.
pub fn subtype_of(media_type: &str) -> Result<&str> {
    let invalid = || InspectionError::InvalidMediaType {
        media_type: media_type.to_string(),
    };
    let (_, rest) = media_type.split_once('/').ok_or_else(invalid)?;
    let subtype = rest.split(';').next().unwrap_or_default().trim();
    if subtype.is_empty() {
        return Err(invalid());
    }
    Ok(subtype)
}
