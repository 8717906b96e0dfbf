//! Bounded-chunk copying with a reusable buffer.
//!
//! Entry payloads are never held in memory as a whole: every transient write
//! and every size measurement streams through one fixed 64 KiB buffer owned
//! by the running traversal.

use std::io::Read;
use std::io::Write;
use std::io::{self};

use crate::InspectionError;
use crate::Result;

/// Chunk size for streamed entry payloads (64 KiB).
pub const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Reusable heap buffer for streaming entry payloads.
///
/// # Examples
///
/// ```
/// use archpeek_core::copy::CopyBuffer;
/// use archpeek_core::copy::copy_with_buffer;
///
/// # fn main() -> archpeek_core::Result<()> {
/// let mut buffer = CopyBuffer::new();
/// let mut input: &[u8] = b"Hello World!";
/// let total = copy_with_buffer(&mut input, &mut std::io::sink(), &mut buffer)?;
/// assert_eq!(total, 12);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Creates a new zero-initialized copy buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies `reader` to `writer` in [`COPY_BUFFER_SIZE`] chunks.
///
/// Returns the number of bytes copied. Pass [`io::sink()`] as the writer to
/// measure a stream without keeping it.
///
/// # Errors
///
/// Returns an error if reading or writing fails, or if the byte count
/// overflows `u64`.
pub fn copy_with_buffer<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
) -> Result<u64> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(InspectionError::Io(e)),
        };

        writer.write_all(&buffer.buf[..bytes_read])?;

        total = total
            .checked_add(bytes_read as u64)
            .ok_or_else(|| InspectionError::SecurityViolation {
                reason: "entry size overflows u64".into(),
            })?;
    }

    Ok(total)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_copy_buffer_size() {
        assert_eq!(CopyBuffer::new().size(), 64 * 1024);
        assert_eq!(CopyBuffer::default().size(), COPY_BUFFER_SIZE);
    }

    #[test]
    fn test_copy_empty_source() {
        let mut buffer = CopyBuffer::new();
        let mut output = Vec::new();
        let total =
            copy_with_buffer(&mut Cursor::new(Vec::new()), &mut output, &mut buffer).unwrap();
        assert_eq!(total, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_copy_multiple_chunks() {
        let mut buffer = CopyBuffer::new();
        let input_data = vec![0x55u8; COPY_BUFFER_SIZE * 3 + 1000];
        let mut output = Vec::new();

        let total =
            copy_with_buffer(&mut Cursor::new(&input_data), &mut output, &mut buffer).unwrap();
        assert_eq!(total, input_data.len() as u64);
        assert_eq!(output, input_data);
    }

    #[test]
    fn test_measure_into_sink() {
        let mut buffer = CopyBuffer::new();
        let input_data = vec![1u8; 200_000];
        let total =
            copy_with_buffer(&mut Cursor::new(&input_data), &mut io::sink(), &mut buffer).unwrap();
        assert_eq!(total, 200_000);
    }

    #[test]
    fn test_copy_with_interrupted_reads() {
        struct InterruptedReader {
            data: Vec<u8>,
            position: usize,
            calls: usize,
        }

        impl Read for InterruptedReader {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                self.calls += 1;
                if self.calls % 2 == 1 && self.position < self.data.len() {
                    return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
                }
                let remaining = &self.data[self.position..];
                let n = remaining.len().min(buf.len()).min(100);
                buf[..n].copy_from_slice(&remaining[..n]);
                self.position += n;
                Ok(n)
            }
        }

        let data = vec![0x42u8; 1000];
        let mut reader = InterruptedReader {
            data: data.clone(),
            position: 0,
            calls: 0,
        };
        let mut output = Vec::new();
        copy_with_buffer(&mut reader, &mut output, &mut CopyBuffer::new()).unwrap();
        assert_eq!(output, data);
    }

    #[test]
    fn test_copy_with_write_failure() {
        struct FailingWriter;

        impl Write for FailingWriter {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("write failed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let result = copy_with_buffer(
            &mut Cursor::new(vec![1u8; 10]),
            &mut FailingWriter,
            &mut CopyBuffer::new(),
        );
        assert!(matches!(result, Err(InspectionError::Io(_))));
    }
}
