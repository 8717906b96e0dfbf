//! 7z traversal for the generic archive reader.

use std::fs::File;
use std::io::{self};

use super::common::EntryInfo;
use super::common::TraversalContext;
use super::common::visit_entry;
use crate::InspectionError;
use crate::Result;
use crate::catalog::AcceptedPaths;
use crate::copy::copy_with_buffer;

/// Walks every entry of a 7z archive.
///
/// The decoder drives iteration through a callback; the first error raised
/// while handling an entry stops decoding and is returned as-is.
///
/// # Errors
///
/// Returns an error if the archive is invalid, encrypted, or an entry
/// cannot be materialized.
pub fn traverse_sevenz(
    source: File,
    format: &'static str,
    ctx: &mut TraversalContext<'_>,
) -> Result<AcceptedPaths> {
    let mut accepted = AcceptedPaths::new();
    let mut failure: Option<InspectionError> = None;
    let scratch = ctx.scratch.staging()?.as_path().to_path_buf();

    let extract_fn = |entry: &sevenz_rust2::ArchiveEntry,
                      reader: &mut dyn io::Read,
                      _dest: &std::path::PathBuf|
     -> std::result::Result<bool, sevenz_rust2::Error> {
        let info = EntryInfo {
            raw_path: entry.name.as_bytes(),
            is_directory: entry.is_directory(),
            size: entry.size,
            tar_derived: true,
        };

        // Skipped entries leave their payload unread; drain it so the
        // decoder stays in step.
        let mut result = visit_entry(ctx, format, info, reader, &mut accepted);
        if result.is_ok() {
            result = copy_with_buffer(reader, &mut io::sink(), ctx.buffer).map(drop);
        }

        match result {
            Ok(()) => Ok(true),
            Err(e) => {
                let message = e.to_string();
                failure = Some(e);
                Err(sevenz_rust2::Error::Other(message.into()))
            }
        }
    };

    let decoded = sevenz_rust2::decompress_with_extract_fn(source, &scratch, extract_fn);

    match (failure, decoded) {
        (Some(e), _) => Err(e),
        (None, Err(e)) => Err(e.into()),
        (None, Ok(())) => Ok(accepted),
    }
}
