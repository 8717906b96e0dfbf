//! Generic-archive reader: tar, compressed tar and 7z.

use std::io::BufReader;
use std::path::Path;

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use xz2::read::XzDecoder;

use super::common::TraversalContext;
use super::common::open_source;
use super::detect::ArchiveKind;
use super::sevenz::traverse_sevenz;
use super::tar::traverse_tar;
use super::traits::FormatReader;
use super::traits::TraversalOutcome;
use crate::Result;

/// Reader for the archive class.
///
/// The concrete layout is picked from the file's leading bytes, not from
/// the declared media type, so a mislabeled `.tar.xz` still reads.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveReader;

impl FormatReader for ArchiveReader {
    fn traverse(&self, source: &Path, ctx: &mut TraversalContext<'_>) -> Result<TraversalOutcome> {
        let mut file = open_source(source)?;
        let kind = ArchiveKind::sniff(&mut file)?;
        tracing::info!(name = ctx.display_name, layout = kind.name(), "reading archive");

        let format = self.format_name();
        let accepted = match kind {
            ArchiveKind::SevenZ => traverse_sevenz(file, format, ctx)?,
            ArchiveKind::Tar => traverse_tar(BufReader::new(file), format, ctx)?,
            ArchiveKind::TarGz => traverse_tar(GzDecoder::new(BufReader::new(file)), format, ctx)?,
            ArchiveKind::TarBz2 => traverse_tar(BzDecoder::new(BufReader::new(file)), format, ctx)?,
            ArchiveKind::TarXz => traverse_tar(XzDecoder::new(BufReader::new(file)), format, ctx)?,
            ArchiveKind::TarZst => traverse_tar(zstd::Decoder::new(file)?, format, ctx)?,
        };

        Ok(TraversalOutcome::Entries(accepted))
    }

    fn format_name(&self) -> &'static str {
        "archive"
    }
}
