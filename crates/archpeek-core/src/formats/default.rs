//! Reader for media types that carry no listing.

use std::path::Path;

use super::common::TraversalContext;
use super::traits::FormatReader;
use super::traits::TraversalOutcome;
use crate::Result;

/// Reader for every media type outside the archive classes.
///
/// Never opens the file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DefaultReader;

impl FormatReader for DefaultReader {
    fn traverse(&self, _source: &Path, ctx: &mut TraversalContext<'_>) -> Result<TraversalOutcome> {
        tracing::info!(name = ctx.display_name, "no listing for media type");
        Ok(TraversalOutcome::NoListing)
    }

    fn format_name(&self) -> &'static str {
        "default"
    }
}
