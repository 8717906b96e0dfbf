//! Content-based detection for the generic archive reader.

use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;

use crate::Result;

const SEVENZ_MAGIC: &[u8] = &[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C];
const GZIP_MAGIC: &[u8] = &[0x1F, 0x8B];
const BZIP2_MAGIC: &[u8] = b"BZh";
const XZ_MAGIC: &[u8] = &[0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00];
const ZSTD_MAGIC: &[u8] = &[0x28, 0xB5, 0x2F, 0xFD];

/// Layouts read by the generic archive reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// Tar archive (uncompressed).
    Tar,
    /// Gzip-compressed tar archive.
    TarGz,
    /// Bzip2-compressed tar archive.
    TarBz2,
    /// XZ-compressed tar archive.
    TarXz,
    /// Zstd-compressed tar archive.
    TarZst,
    /// 7z archive.
    SevenZ,
}

impl ArchiveKind {
    /// Classifies an archive by its leading bytes.
    ///
    /// Anything without a known compression or 7z signature is read as
    /// plain tar.
    ///
    /// # Examples
    ///
    /// ```
    /// use archpeek_core::formats::detect::ArchiveKind;
    ///
    /// assert_eq!(ArchiveKind::from_magic(b"\x1f\x8b\x08\x00"), ArchiveKind::TarGz);
    /// assert_eq!(ArchiveKind::from_magic(b"BZh91AY"), ArchiveKind::TarBz2);
    /// assert_eq!(ArchiveKind::from_magic(b"file.txt\0"), ArchiveKind::Tar);
    /// ```
    #[must_use]
    pub fn from_magic(head: &[u8]) -> Self {
        if head.starts_with(SEVENZ_MAGIC) {
            Self::SevenZ
        } else if head.starts_with(GZIP_MAGIC) {
            Self::TarGz
        } else if head.starts_with(BZIP2_MAGIC) {
            Self::TarBz2
        } else if head.starts_with(XZ_MAGIC) {
            Self::TarXz
        } else if head.starts_with(ZSTD_MAGIC) {
            Self::TarZst
        } else {
            Self::Tar
        }
    }

    /// Reads the signature at the start of `source`, then rewinds it.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or seeking fails.
    pub fn sniff<R: Read + Seek>(source: &mut R) -> Result<Self> {
        let mut head = Vec::with_capacity(SEVENZ_MAGIC.len());
        source.by_ref().take(SEVENZ_MAGIC.len() as u64).read_to_end(&mut head)?;
        source.seek(SeekFrom::Start(0))?;
        Ok(Self::from_magic(&head))
    }

    /// Returns a short name for logging.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tar => "tar",
            Self::TarGz => "tar.gz",
            Self::TarBz2 => "tar.bz2",
            Self::TarXz => "tar.xz",
            Self::TarZst => "tar.zst",
            Self::SevenZ => "7z",
        }
    }
}
