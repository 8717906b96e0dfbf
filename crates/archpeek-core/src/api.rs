//! High-level public API.

use std::path::Path;

use crate::Inspection;
use crate::InspectionRequest;
use crate::InspectorConfig;
use crate::ProgressCallback;
use crate::config::SubtypeClass;
use crate::formats::subtype_of;
use crate::report::InspectionResult;

/// Inspects a local file and returns its peek.
///
/// Never fails; problems are reported through the result's status and
/// error records.
///
/// # Examples
///
/// ```no_run
/// use archpeek_core::InspectionRequest;
/// use archpeek_core::InspectorConfig;
/// use archpeek_core::PeekType;
/// use archpeek_core::inspect;
///
/// let request = InspectionRequest::new("test.zip", "/data/test.zip", "42", "application/zip");
/// let result = inspect(request, &InspectorConfig::default());
/// if result.peek_type == PeekType::Listing {
///     println!("{}", result.peek_text.unwrap_or_default());
/// }
/// ```
#[must_use]
pub fn inspect(request: InspectionRequest, config: &InspectorConfig) -> InspectionResult {
    Inspection::new(request, config).process()
}

/// Inspects a local file, reporting progress to a callback.
#[must_use]
pub fn inspect_with_progress(
    request: InspectionRequest,
    config: &InspectorConfig,
    progress: &mut dyn ProgressCallback,
) -> InspectionResult {
    Inspection::new(request, config).process_with_progress(progress)
}

/// Inspects a file, using its file name as the display name and identifier.
#[must_use]
pub fn inspect_path<P: AsRef<Path>>(
    path: P,
    media_type: &str,
    config: &InspectorConfig,
) -> InspectionResult {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    inspect(
        InspectionRequest::new(name.clone(), path, name, media_type),
        config,
    )
}

/// Returns the reader class a declared media type dispatches to.
///
/// `Ok(None)` means the media type gets no listing.
///
/// # Errors
///
/// Returns `InspectionError::InvalidMediaType` for a value without a
/// `type/subtype` shape.
///
/// # Examples
///
/// ```
/// use archpeek_core::classify;
/// use archpeek_core::InspectorConfig;
/// use archpeek_core::config::SubtypeClass;
///
/// let config = InspectorConfig::default();
/// assert_eq!(classify("application/x-gzip", &config).unwrap(), Some(SubtypeClass::Gzip));
/// assert_eq!(classify("image/png", &config).unwrap(), None);
/// ```
pub fn classify(media_type: &str, config: &InspectorConfig) -> crate::Result<Option<SubtypeClass>> {
    Ok(config.classes.classify(subtype_of(media_type)?))
}
