//! Tar entry traversal shared by the generic archive and gzip readers.

use std::io::Read;

use tar::EntryType;

use super::common::EntryInfo;
use super::common::TraversalContext;
use super::common::visit_entry;
use crate::Result;
use crate::catalog::AcceptedPaths;

/// Walks every entry of a tar stream.
///
/// Extended-header and long-name records are consumed by the tar reader or
/// skipped here; everything else goes through
/// [`visit_entry`] with tar platform-artifact exclusion enabled.
///
/// # Errors
///
/// Returns an error if the stream is not a valid tar archive or an entry
/// cannot be materialized.
pub fn traverse_tar<R: Read>(
    source: R,
    format: &'static str,
    ctx: &mut TraversalContext<'_>,
) -> Result<AcceptedPaths> {
    let mut archive = tar::Archive::new(source);
    let mut accepted = AcceptedPaths::new();

    for entry in archive.entries()? {
        let mut entry = entry?;
        let entry_type = entry.header().entry_type();
        if is_header_record(entry_type) {
            continue;
        }

        let raw_path = entry.path_bytes().into_owned();
        let info = EntryInfo {
            raw_path: &raw_path,
            is_directory: entry_type.is_dir(),
            size: entry.size(),
            tar_derived: true,
        };
        visit_entry(ctx, format, info, &mut entry, &mut accepted)?;
    }

    Ok(accepted)
}

const fn is_header_record(entry_type: EntryType) -> bool {
    matches!(
        entry_type,
        EntryType::XGlobalHeader
            | EntryType::XHeader
            | EntryType::GNULongName
            | EntryType::GNULongLink
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::NoopProgress;
    use crate::catalog::Catalog;
    use crate::copy::CopyBuffer;
    use crate::formats::common::ScratchSpace;
    use crate::report::ErrorLog;
    use crate::test_utils::TarTestBuilder;
    use tempfile::TempDir;

    fn walk(data: &[u8]) -> (AcceptedPaths, Catalog, ErrorLog) {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.tar");
        let mut scratch = ScratchSpace::new(None, &input);
        let mut catalog = Catalog::new();
        let mut errors = ErrorLog::new();
        let mut progress = NoopProgress;
        let mut buffer = CopyBuffer::new();
        let accepted = {
            let mut ctx = TraversalContext {
                display_name: "in.tar",
                scratch: &mut scratch,
                max_path_depth: 32,
                catalog: &mut catalog,
                errors: &mut errors,
                progress: &mut progress,
                buffer: &mut buffer,
            };
            traverse_tar(data, "tar", &mut ctx).unwrap()
        };
        scratch.close(&mut errors);
        (accepted, catalog, errors)
    }

    #[test]
    fn test_files_and_directories() {
        let data = TarTestBuilder::new()
            .add_directory("docs/")
            .add_file("docs/test.txt", b"Hello World!")
            .build();

        let (accepted, catalog, errors) = walk(&data);
        assert_eq!(accepted.len(), 2);
        assert!(errors.is_empty());

        let entries = catalog.entries();
        assert_eq!(entries[0].item_path, "docs");
        assert!(entries[0].is_directory);
        assert_eq!(entries[0].media_type, "directory");
        assert_eq!(entries[1].item_name, "test.txt");
        assert_eq!(entries[1].item_size, 12);
        assert_eq!(entries[1].media_type, "text/plain");
    }

    #[test]
    fn test_resource_forks_excluded() {
        let data = TarTestBuilder::new()
            .add_file("._test.txt", b"fork")
            .add_file("test.txt", b"data")
            .build();

        let (accepted, catalog, _) = walk(&data);
        assert_eq!(accepted.iter().collect::<Vec<_>>(), [&b"test.txt"[..]]);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_long_names_resolved() {
        let long = format!("{}/file.txt", "d".repeat(150));
        let data = TarTestBuilder::new().add_file(&long, b"x").build();

        let (accepted, catalog, _) = walk(&data);
        assert_eq!(accepted.len(), 1);
        assert_eq!(catalog.entries()[0].item_path, long);
    }

    #[test]
    fn test_traversal_entry_skipped() {
        let data = TarTestBuilder::new()
            .add_raw_path(b"../../evil.txt", b"x")
            .add_file("ok.txt", b"y")
            .build();

        let (accepted, catalog, errors) = walk(&data);
        assert_eq!(accepted.len(), 1);
        assert_eq!(catalog.entries()[0].item_path, "ok.txt");
        assert_eq!(errors.records().len(), 1);
    }
}
