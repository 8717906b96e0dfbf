//! Catalog of nested entries discovered during traversal.

use serde::Serialize;

/// One nested entry of an inspected archive.
///
/// Paths and names are stored as text; entry names that are not valid UTF-8
/// are converted lossily.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// Leaf segment of the sanitized path.
    pub item_name: String,
    /// Sanitized entry path.
    pub item_path: String,
    /// Size in bytes as reported by the archive or measured while streaming.
    pub item_size: u64,
    /// Resolved media type, or `directory`.
    pub media_type: String,
    /// Whether the entry is a directory.
    pub is_directory: bool,
}

/// Append-only accumulator of [`CatalogEntry`] records.
///
/// Entries keep the order in which they were recorded, which mirrors
/// archive traversal order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry.
    pub fn record(
        &mut self,
        path: &[u8],
        name: &[u8],
        size: u64,
        media_type: impl Into<String>,
        is_directory: bool,
    ) {
        let entry = CatalogEntry {
            item_name: String::from_utf8_lossy(name).into_owned(),
            item_path: String::from_utf8_lossy(path).into_owned(),
            item_size: size,
            media_type: media_type.into(),
            is_directory,
        };
        tracing::debug!(
            path = %entry.item_path,
            size = entry.item_size,
            media_type = %entry.media_type,
            is_directory,
            "recorded entry"
        );
        self.entries.push(entry);
    }

    /// Returns the recorded entries in order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Returns the number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the catalog, returning its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<CatalogEntry> {
        self.entries
    }
}

/// Ordered sequence of sanitized, non-excluded entry paths.
///
/// Input to [`render`](crate::render::render).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcceptedPaths(Vec<Vec<u8>>);

impl AcceptedPaths {
    /// Creates an empty path set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sanitized path.
    pub fn push(&mut self, path: impl Into<Vec<u8>>) {
        self.0.push(path.into());
    }

    /// Iterates over the paths in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.0.iter().map(Vec::as_slice)
    }

    /// Returns the number of accepted paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no path was accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<P: Into<Vec<u8>>> FromIterator<P> for AcceptedPaths {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
