//! Memory-Mapped File untuk Zero-Copy Decode
//!
//! File di-mmap read-only, lalu `ByteInStream` meminjam mapping langsung:
//! - Zero-copy read: decoder membaca dari page cache tanpa copy
//! - Lifetime: decoder tidak bisa hidup lebih lama dari mapping

use memmap2::{Mmap, MmapMut, MmapOptions};
use std::fs::{File, OpenOptions};
use std::path::Path;

use crate::error::Result;
use crate::protocol::{ByteInStream, ByteOutStream};

/// File read-only yang dipetakan ke memory
pub struct MappedFile {
    // None untuk file kosong (mmap 0 byte tidak portable)
    mmap: Option<Mmap>,
}

impl MappedFile {
    /// Buka dan mmap file di `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let len = file.metadata()?.len();

        if len == 0 {
            tracing::debug!(path = %path.display(), "empty file, skipping mmap");
            return Ok(Self { mmap: None });
        }

        // SAFETY: Mapping read-only; caller tidak boleh memodifikasi file
        // selama MappedFile masih hidup.
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        tracing::debug!(path = %path.display(), len, "mapped file");

        Ok(Self { mmap: Some(mmap) })
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decoder baru yang meminjam seluruh mapping
    #[inline(always)]
    pub fn in_stream(&self) -> ByteInStream<'_> {
        ByteInStream::new(self.as_bytes())
    }
}

/// Tulis isi encoder ke `path` lewat writable mapping.
///
/// File dibuat atau di-truncate ke panjang encoder.
pub fn write_stream<P: AsRef<Path>>(path: P, stream: &ByteOutStream) -> Result<()> {
    let path = path.as_ref();
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    file.set_len(stream.length() as u64)?;
    if stream.length() == 0 {
        return Ok(());
    }

    // SAFETY: File baru saja dibuka read/write dan di-resize oleh proses ini
    let mut mmap: MmapMut = unsafe { MmapOptions::new().len(stream.length()).map_mut(&file)? };
    mmap.copy_from_slice(stream.data());
    mmap.flush()?;

    tracing::debug!(path = %path.display(), len = stream.length(), "wrote stream");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_write_then_map() {
        let path = "test_mapped_roundtrip.dat";

        {
            let mut out = ByteOutStream::new();
            out.put_version(1).put_string("Hello, bdex!").put_i56(-5);
            write_stream(path, &out).unwrap();

            let mapped = MappedFile::open(path).unwrap();
            assert_eq!(mapped.as_bytes(), out.data());

            let mut x = mapped.in_stream();
            assert_eq!(x.get_version(), Some(1));
            assert_eq!(x.get_string().as_deref(), Some("Hello, bdex!"));
            assert_eq!(x.get_i56(), Some(-5));
            assert!(x.finish().is_ok());
        }

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_empty_file() {
        let path = "test_mapped_empty.dat";

        {
            write_stream(path, &ByteOutStream::new()).unwrap();
            let mapped = MappedFile::open(path).unwrap();
            assert!(mapped.is_empty());

            let x = mapped.in_stream();
            assert!(x.is_valid());
            assert!(x.is_empty());
        }

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file() {
        let err = MappedFile::open("does_not_exist_bdex.dat").err().unwrap();
        assert!(matches!(err, crate::error::StreamError::Io(_)));
    }
}
