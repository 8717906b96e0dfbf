//! Container-archive (zip) reader.

use std::io::BufReader;
use std::path::Path;

use zip::ZipArchive;

use super::common::EntryInfo;
use super::common::TraversalContext;
use super::common::open_source;
use super::common::visit_entry;
use super::traits::FormatReader;
use super::traits::TraversalOutcome;
use crate::Result;
use crate::catalog::AcceptedPaths;

/// Reader for zip containers.
///
/// Entries whose names fail the container's own enclosure check are never
/// materialized; they are logged as extraction errors and skipped. Tar
/// platform-artifact exclusion does not apply.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ZipReader;

impl FormatReader for ZipReader {
    fn traverse(&self, source: &Path, ctx: &mut TraversalContext<'_>) -> Result<TraversalOutcome> {
        tracing::info!(name = ctx.display_name, "reading zip container");

        let file = open_source(source)?;
        let mut archive = ZipArchive::new(BufReader::new(file))?;
        let mut accepted = AcceptedPaths::new();

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let raw_path = entry.name_raw().to_vec();

            if entry.enclosed_name().is_none() {
                ctx.errors.extraction(format!(
                    "skipped unsafe zip entry {}: name escapes the container",
                    String::from_utf8_lossy(&raw_path)
                ));
                continue;
            }

            let info = EntryInfo {
                raw_path: &raw_path,
                is_directory: entry.is_dir(),
                size: entry.size(),
                tar_derived: false,
            };
            visit_entry(ctx, self.format_name(), info, &mut entry, &mut accepted)?;
        }

        Ok(TraversalOutcome::Entries(accepted))
    }

    fn format_name(&self) -> &'static str {
        "zip"
    }
}
