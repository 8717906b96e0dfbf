//! Best-effort media type resolution for cataloged entries.

use std::path::Path;

/// Media type used when neither content nor filename identify an entry.
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Media type recorded for directory entries.
pub const DIRECTORY_MEDIA_TYPE: &str = "directory";

/// Resolves the media type of an entry.
///
/// Tries, in order:
/// 1. a content sniff of the transient file, if one is given;
/// 2. an extension guess from `filename`, if one is given;
/// 3. [`FALLBACK_MEDIA_TYPE`].
///
/// Failures at any step (unreadable file, unknown extension) fall through
/// to the next one; this function never fails.
///
/// # Examples
///
/// ```
/// use archpeek_core::media_type::resolve;
///
/// assert_eq!(resolve(None, Some("notes.txt")), "text/plain");
/// assert_eq!(resolve(None, Some("no-extension")), "application/octet-stream");
/// assert_eq!(resolve(None, None), "application/octet-stream");
/// ```
#[must_use]
pub fn resolve(transient: Option<&Path>, filename: Option<&str>) -> String {
    if let Some(path) = transient {
        match infer::get_from_path(path) {
            Ok(Some(kind)) => return kind.mime_type().to_string(),
            Ok(None) => {}
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "content sniff failed");
            }
        }
    }

    filename
        .and_then(|name| mime_guess::from_path(name).first())
        .map_or_else(
            || FALLBACK_MEDIA_TYPE.to_string(),
            |guess| guess.essence_str().to_string(),
        )
}
