//! Compressed-stream (gzip) reader.

use std::io::BufReader;
use std::io::Cursor;
use std::io::Read;
use std::io::{self};
use std::path::Path;

use flate2::read::GzDecoder;

use super::common::TraversalContext;
use super::common::open_source;
use super::tar::traverse_tar;
use super::traits::FormatReader;
use super::traits::TraversalOutcome;
use crate::Result;
use crate::catalog::AcceptedPaths;
use crate::copy::copy_with_buffer;
use crate::media_type;
use crate::security::entry_path;

/// Bytes of decompressed content sniffed for a tar header.
const SNIFF_LEN: u64 = 512;

/// Suffixes stripped from the display name when the stream carries no
/// original filename.
const COMPRESSED_SUFFIXES: [&str; 3] = [".gz", ".gzip", ".z"];

/// Reader for gzip streams.
///
/// A stream that decompresses to a tar archive is walked entry by entry.
/// Anything else is cataloged as a single file named after the original
/// filename stored in the gzip header.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GzipReader;

impl FormatReader for GzipReader {
    fn traverse(&self, source: &Path, ctx: &mut TraversalContext<'_>) -> Result<TraversalOutcome> {
        let file = open_source(source)?;
        let mut decoder = GzDecoder::new(BufReader::new(file));

        let mut head = Vec::with_capacity(SNIFF_LEN as usize);
        (&mut decoder).take(SNIFF_LEN).read_to_end(&mut head)?;

        if infer::archive::is_tar(&head) {
            tracing::info!(name = ctx.display_name, "reading tar inside gzip");
            let stream = Cursor::new(head).chain(decoder);
            let accepted = traverse_tar(stream, self.format_name(), ctx)?;
            return Ok(TraversalOutcome::Entries(accepted));
        }

        tracing::info!(name = ctx.display_name, "reading single-file gzip");
        let raw_name = decoder
            .header()
            .and_then(|header| header.filename())
            .map_or_else(|| fallback_name(ctx.display_name), <[u8]>::to_vec);

        let mut accepted = AcceptedPaths::new();
        let Some(path) = entry_path::sanitize(&raw_name) else {
            return Ok(TraversalOutcome::Entries(accepted));
        };
        if entry_path::is_excluded(path, true) {
            return Ok(TraversalOutcome::Entries(accepted));
        }

        let rest = copy_with_buffer(&mut decoder, &mut io::sink(), ctx.buffer)?;
        let size = head.len() as u64 + rest;

        let name = String::from_utf8_lossy(path).into_owned();
        let media_type = media_type::resolve(None, Some(&name));
        accepted.push(path);
        ctx.record(path, size, media_type, false);

        Ok(TraversalOutcome::Entries(accepted))
    }

    fn format_name(&self) -> &'static str {
        "gzip"
    }
}

/// Derives an entry name from the display name by dropping a compression
/// suffix.
fn fallback_name(display_name: &str) -> Vec<u8> {
    let lower = display_name.to_ascii_lowercase();
    let stem_len = COMPRESSED_SUFFIXES
        .iter()
        .find(|suffix| lower.ends_with(*suffix) && lower.len() > suffix.len())
        .map_or(display_name.len(), |suffix| display_name.len() - suffix.len());
    display_name.as_bytes()[..stem_len].to_vec()
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
    use crate::test_utils::create_test_gzip;
    use std::fs;
    use tempfile::TempDir;

    fn read(display_name: &str, data: &[u8]) -> (Result<TraversalOutcome>, Catalog) {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("upload");
        fs::write(&input, data).unwrap();

        let mut scratch = ScratchSpace::new(None, &input);
        let mut catalog = Catalog::new();
        let mut errors = ErrorLog::new();
        let mut progress = NoopProgress;
        let mut buffer = CopyBuffer::new();
        let outcome = {
            let mut ctx = TraversalContext {
                display_name,
                scratch: &mut scratch,
                max_path_depth: 32,
                catalog: &mut catalog,
                errors: &mut errors,
                progress: &mut progress,
                buffer: &mut buffer,
            };
            GzipReader.traverse(&input, &mut ctx)
        };
        scratch.close(&mut errors);
        (outcome, catalog)
    }

    #[test]
    fn test_gzipped_tar() {
        let tar = TarTestBuilder::new().add_file("test.txt", b"Hello World!").build();
        let (outcome, catalog) = read("test.tar.gz", &create_test_gzip(&tar, None));

        assert!(matches!(outcome.unwrap(), TraversalOutcome::Entries(p) if p.len() == 1));
        let entry = &catalog.entries()[0];
        assert_eq!(entry.item_path, "test.txt");
        assert_eq!(entry.item_size, 12);
        assert_eq!(entry.media_type, "text/plain");
    }

    #[test]
    fn test_single_file_uses_embedded_name() {
        let data = create_test_gzip(b"Hello World!", Some("test.txt"));
        let (outcome, catalog) = read("upload.gz", &data);

        assert!(outcome.is_ok());
        let entry = &catalog.entries()[0];
        assert_eq!(entry.item_name, "test.txt");
        assert_eq!(entry.item_size, 12);
        assert_eq!(entry.media_type, "text/plain");
        assert!(!entry.is_directory);
    }

    #[test]
    fn test_single_file_without_embedded_name() {
        let data = create_test_gzip(b"{\"a\": 1}", None);
        let (_, catalog) = read("report.json.gz", &data);

        let entry = &catalog.entries()[0];
        assert_eq!(entry.item_name, "report.json");
        assert_eq!(entry.media_type, "application/json");
    }

    #[test]
    fn test_large_single_file_size() {
        let payload = vec![b'a'; 300_000];
        let data = create_test_gzip(&payload, Some("big.bin"));
        let (_, catalog) = read("big.bin.gz", &data);
        assert_eq!(catalog.entries()[0].item_size, 300_000);
    }

    #[test]
    fn test_not_gzip() {
        let (outcome, catalog) = read("fake.gz", b"plain text, not gzip");
        assert!(outcome.is_err());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_fallback_name() {
        assert_eq!(fallback_name("notes.txt.gz"), b"notes.txt");
        assert_eq!(fallback_name("NOTES.TXT.GZIP"), b"NOTES.TXT");
        assert_eq!(fallback_name("archive.Z"), b"archive");
        assert_eq!(fallback_name("noext"), b"noext");
        assert_eq!(fallback_name(".gz"), b".gz");
    }
}
