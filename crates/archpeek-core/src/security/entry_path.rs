//! Entry path sanitization and platform-artifact classification.
//!
//! Entry names are handled as raw bytes: tar headers carry no encoding, and
//! the peek text is only checked for UTF-8 validity once it has been
//! rendered.

/// Reserved directory name macOS archivers use for resource-fork shadows.
pub const MACOS_WRAPPER_DIR: &[u8] = b"__MACOSX";

/// Finder desktop-metadata file name.
pub const DESKTOP_METADATA: &[u8] = b".DS_Store";

/// Leaf prefix of AppleDouble resource-fork entries.
pub const RESOURCE_FORK_PREFIX: &[u8] = b"._";

/// Segment names of tar extended-header and long-name entries.
pub const TAR_HEADER_MARKERS: [&[u8]; 2] = [b"PaxHeader", b"@LongLink"];

/// Returns `true` if `byte` is a path separator.
#[inline]
pub const fn is_separator(byte: u8) -> bool {
    byte == b'/' || byte == b'\\'
}

/// Returns `true` if the path ends with a separator.
#[inline]
pub fn ends_in_separator(path: &[u8]) -> bool {
    path.last().is_some_and(|b| is_separator(*b))
}

/// Normalizes a raw entry path.
///
/// Strips exactly one trailing separator, then rejects the result if it is
/// empty (an archive's "self" entry).
///
/// # Examples
///
/// ```
/// use archpeek_core::security::entry_path::sanitize;
///
/// assert_eq!(sanitize(b"test/path/"), Some(&b"test/path"[..]));
/// assert_eq!(sanitize(b"test/path"), Some(&b"test/path"[..]));
/// assert_eq!(sanitize(b"/"), None);
/// assert_eq!(sanitize(b""), None);
/// ```
pub fn sanitize(raw: &[u8]) -> Option<&[u8]> {
    let trimmed = if ends_in_separator(raw) {
        &raw[..raw.len() - 1]
    } else {
        raw
    };

    if trimmed.is_empty() { None } else { Some(trimmed) }
}

/// Splits a path into `/`-separated segments.
pub fn segments(path: &[u8]) -> impl Iterator<Item = &[u8]> {
    path.split(|b| *b == b'/')
}

/// Returns the last non-empty-tail segment of a path.
///
/// Trailing `/` are ignored, so `a/b/` yields `b`.
pub fn leaf(path: &[u8]) -> &[u8] {
    let end = path.iter().rposition(|b| *b != b'/').map_or(0, |i| i + 1);
    let trimmed = &path[..end];
    trimmed.rsplit(|b| *b == b'/').next().unwrap_or(trimmed)
}

/// Returns the catalog item name for a raw entry path: the leaf of its
/// sanitized form.
///
/// # Examples
///
/// ```
/// use archpeek_core::security::entry_path::item_name;
///
/// assert_eq!(item_name(b"test/path"), Some(&b"path"[..]));
/// assert_eq!(item_name(b"test"), Some(&b"test"[..]));
/// assert_eq!(item_name(b""), None);
/// ```
pub fn item_name(raw: &[u8]) -> Option<&[u8]> {
    sanitize(raw).map(leaf)
}

/// Returns `true` if any segment is the macOS wrapper directory.
pub fn is_platform_noise(path: &[u8]) -> bool {
    segments(path).any(|s| s == MACOS_WRAPPER_DIR)
}

/// Returns `true` if the leaf segment is the desktop-metadata file.
pub fn is_hidden_metadata(path: &[u8]) -> bool {
    item_name(path).is_some_and(|name| name.trim_ascii() == DESKTOP_METADATA)
}

/// Returns `true` for resource-fork shadows and tar extended-header or
/// long-link pseudo entries.
pub fn is_tar_platform_artifact(path: &[u8]) -> bool {
    leaf(path).starts_with(RESOURCE_FORK_PREFIX)
        || segments(path).any(|s| TAR_HEADER_MARKERS.contains(&s))
}

/// Returns `true` if a raw entry path marks a directory.
///
/// Desktop-metadata and platform-noise paths never count as directories.
///
/// # Examples
///
/// ```
/// use archpeek_core::security::entry_path::is_directory_marker;
///
/// assert!(is_directory_marker(b"test/path/"));
/// assert!(!is_directory_marker(b"test/path"));
/// assert!(!is_directory_marker(b"__MACOSX/"));
/// ```
pub fn is_directory_marker(raw: &[u8]) -> bool {
    ends_in_separator(raw) && !is_hidden_metadata(raw) && !is_platform_noise(raw)
}

/// Returns `true` if a sanitized path names the archive root itself, as the
/// leading `./` entry of `tar -C dir .` does.
///
/// # Examples
///
/// ```
/// use archpeek_core::security::entry_path::is_root_reference;
///
/// assert!(is_root_reference(b"."));
/// assert!(is_root_reference(b"./."));
/// assert!(!is_root_reference(b"./a"));
/// assert!(!is_root_reference(b".."));
/// ```
pub fn is_root_reference(path: &[u8]) -> bool {
    segments(path).all(|s| s == b".")
}

/// Returns `true` if an entry must be left out of the catalog and the
/// listing.
///
/// `tar_derived` enables the tar platform-artifact rule.
pub fn is_excluded(path: &[u8], tar_derived: bool) -> bool {
    is_platform_noise(path)
        || is_hidden_metadata(path)
        || (tar_derived && is_tar_platform_artifact(path))
}
