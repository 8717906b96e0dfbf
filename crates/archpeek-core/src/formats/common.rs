//! Entry handling shared by all format readers.
//!
//! Every reader funnels its entries through [`visit_entry`], which applies
//! sanitization and exclusion, checks staging containment, materializes
//! file payloads into a transient file for content sniffing, records the
//! catalog entry and removes the transient file again.

use std::fs::File;
use std::fs::OpenOptions;
use std::fs::create_dir_all;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::InspectionError;
use crate::ProgressCallback;
use crate::Result;
use crate::catalog::AcceptedPaths;
use crate::catalog::Catalog;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;
use crate::media_type;
use crate::report::ErrorLog;
use crate::security::entry_path;
use crate::security::validate_entry_path;
use crate::types::StagingDir;

/// Lazily created private directory for transient entry files.
///
/// Nothing touches the filesystem until a reader first needs to check or
/// write an entry path, so readers that never materialize entries do not
/// require a writable staging directory.
#[derive(Debug)]
pub struct ScratchSpace {
    configured: Option<PathBuf>,
    input: PathBuf,
    active: Option<(TempDir, StagingDir)>,
}

impl ScratchSpace {
    /// Creates a scratch space for `input`, staged under `configured` if set
    /// and next to `input` otherwise.
    #[must_use]
    pub fn new(configured: Option<&Path>, input: &Path) -> Self {
        Self {
            configured: configured.map(Path::to_path_buf),
            input: input.to_path_buf(),
            active: None,
        }
    }

    /// Returns the scratch directory, creating it on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the staging directory is invalid or the scratch
    /// directory cannot be created.
    pub fn staging(&mut self) -> Result<&StagingDir> {
        let active = match self.active.take() {
            Some(active) => active,
            None => {
                let root = StagingDir::for_input(self.configured.as_deref(), &self.input)?;
                let dir = root.scratch()?;
                let staging = StagingDir::new(dir.path())?;
                tracing::debug!(path = %staging.as_path().display(), "created scratch directory");
                (dir, staging)
            }
        };
        Ok(&self.active.insert(active).1)
    }

    /// Removes the scratch directory, if one was created.
    ///
    /// A failed removal is logged as an extraction error.
    pub fn close(self, errors: &mut ErrorLog) {
        if let Some((dir, staging)) = self.active
            && let Err(e) = dir.close()
        {
            errors.extraction(format!(
                "failed to remove scratch directory {}: {e}",
                staging.as_path().display()
            ));
        }
    }
}

/// Mutable state threaded through one traversal.
pub struct TraversalContext<'a> {
    /// Caller-facing name of the inspected file.
    pub display_name: &'a str,
    /// Where transient entry files go.
    pub scratch: &'a mut ScratchSpace,
    /// Maximum number of path segments a file entry may have.
    pub max_path_depth: usize,
    /// Catalog of recorded entries.
    pub catalog: &'a mut Catalog,
    /// Error log for the request.
    pub errors: &'a mut ErrorLog,
    /// Progress observer.
    pub progress: &'a mut dyn ProgressCallback,
    /// Reusable chunk buffer.
    pub buffer: &'a mut CopyBuffer,
}

impl TraversalContext<'_> {
    /// Records one catalog entry and notifies the progress observer.
    pub fn record(&mut self, path: &[u8], size: u64, media_type: String, is_directory: bool) {
        let name = entry_path::leaf(path);
        self.catalog.record(path, name, size, media_type, is_directory);
        self.progress
            .on_entry(&String::from_utf8_lossy(path), is_directory);
    }
}

/// Container-reported metadata of one entry.
#[derive(Debug, Clone, Copy)]
pub struct EntryInfo<'e> {
    /// Entry path exactly as stored in the archive.
    pub raw_path: &'e [u8],
    /// Whether the container flags the entry as a directory.
    pub is_directory: bool,
    /// Size reported by the container.
    pub size: u64,
    /// Whether tar platform-artifact exclusion applies.
    pub tar_derived: bool,
}

/// Processes one archive entry.
///
/// Excluded entries are skipped silently. A path made only of `.` segments
/// names the staging root and is cataloged as a directory. Entries that fail
/// the staging containment check, or file entries deeper than the configured
/// limit, are logged as extraction errors and skipped. Accepted entries are
/// cataloged and their sanitized path is appended to `accepted`.
///
/// The payload in `data` is only read for file entries that pass all checks.
///
/// # Errors
///
/// Fails the traversal if the transient target already exists before the
/// write, the write does not produce the transient file, or I/O fails.
pub fn visit_entry<R: Read + ?Sized>(
    ctx: &mut TraversalContext<'_>,
    format: &'static str,
    info: EntryInfo<'_>,
    data: &mut R,
    accepted: &mut AcceptedPaths,
) -> Result<()> {
    let Some(path) = entry_path::sanitize(info.raw_path) else {
        return Ok(());
    };
    if entry_path::is_excluded(path, info.tar_derived) {
        tracing::debug!(path = %String::from_utf8_lossy(path), "skipped platform artifact");
        return Ok(());
    }

    let is_directory = info.is_directory || entry_path::is_directory_marker(info.raw_path);
    if entry_path::is_root_reference(path) {
        accepted.push(path);
        ctx.record(path, info.size, media_type::DIRECTORY_MEDIA_TYPE.to_string(), true);
        return Ok(());
    }

    let staging = ctx.scratch.staging()?;
    let max_depth = if is_directory { usize::MAX } else { ctx.max_path_depth };
    let safe = match validate_entry_path(path, staging, max_depth) {
        Ok(safe) => safe,
        Err(e) if e.is_security_violation() => {
            ctx.errors.extraction(format!(
                "skipped unsafe {format} entry {}: {e}",
                String::from_utf8_lossy(info.raw_path)
            ));
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    let target = staging.join(&safe);

    accepted.push(path);

    if is_directory {
        ctx.record(path, info.size, media_type::DIRECTORY_MEDIA_TYPE.to_string(), true);
        return Ok(());
    }

    let transient = TransientFile::create(&target)?;
    let size = transient.fill(data, ctx.buffer)?;
    if !transient.path().exists() {
        return Err(InspectionError::TransientMissing {
            format,
            path: transient.path().to_path_buf(),
        });
    }

    let name = String::from_utf8_lossy(entry_path::leaf(path)).into_owned();
    let media_type = media_type::resolve(Some(transient.path()), Some(&name));
    ctx.record(path, size, media_type, false);

    if let Err(e) = transient.remove() {
        ctx.errors.extraction(format!(
            "failed to remove transient file for {}: {e}",
            String::from_utf8_lossy(path)
        ));
    }
    Ok(())
}

/// A transient entry file that is removed when dropped.
///
/// [`TransientFile::remove`] deletes it explicitly and reports failure;
/// the `Drop` impl covers every early-return path.
#[derive(Debug)]
pub struct TransientFile {
    path: PathBuf,
    removed: bool,
}

impl TransientFile {
    /// Creates the transient file, along with any missing parent
    /// directories.
    ///
    /// # Errors
    ///
    /// Returns `InspectionError::TransientCollision` if something already
    /// exists at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }

        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(_) => Ok(Self {
                path: path.to_path_buf(),
                removed: false,
            }),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(InspectionError::TransientCollision {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Streams `data` into the file, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn fill<R: Read + ?Sized>(&self, data: &mut R, buffer: &mut CopyBuffer) -> Result<u64> {
        let file = OpenOptions::new().write(true).truncate(true).open(&self.path)?;
        let mut writer = BufWriter::with_capacity(buffer.size(), file);
        let written = copy_with_buffer(data, &mut writer, buffer)?;
        writer.flush()?;
        Ok(written)
    }

    /// Returns the transient file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the file now.
    ///
    /// A file that is already gone counts as removed.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if deletion fails.
    pub fn remove(mut self) -> io::Result<()> {
        self.removed = true;
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

impl Drop for TransientFile {
    fn drop(&mut self) {
        if !self.removed {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// Opens a source file for reading.
///
/// # Errors
///
/// Returns an error naming the path if it cannot be opened.
pub fn open_source(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        InspectionError::Io(io::Error::new(
            e.kind(),
            format!("failed to open {}: {e}", path.display()),
        ))
    })
}
