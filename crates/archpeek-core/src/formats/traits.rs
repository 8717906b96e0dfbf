//! Common trait for format readers.

use std::path::Path;

use super::common::TraversalContext;
use crate::Result;
use crate::catalog::AcceptedPaths;

/// What a completed traversal produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraversalOutcome {
    /// The reader walked the file; these paths were accepted.
    Entries(AcceptedPaths),
    /// The reader does not list contents for this kind of file.
    NoListing,
}

/// Trait for format readers.
pub trait FormatReader {
    /// Walks the file at `source`, recording entries into `ctx`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read as this format or a
    /// transient write fails. Entries recorded before the failure stay in
    /// the catalog.
    fn traverse(&self, source: &Path, ctx: &mut TraversalContext<'_>) -> Result<TraversalOutcome>;

    /// Returns the reader name.
    fn format_name(&self) -> &'static str;
}
