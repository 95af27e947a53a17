//! # Extraction Module
//!
//! Reads upstream release archives into [`ArchiveEntry`] values.
//!
//! The container format is sniffed once from the leading magic bytes and the
//! matching [`EntrySource`] implementation is returned by [`open`]. Callers only
//! ever see a lazy iterator of regular files; directories, links and other
//! special entries never reach them.

mod tarxz;
mod zipfile;

pub use tarxz::TarXzSource;
pub use zipfile::ZipSource;

use crate::common::ArchiveEntry;
use crate::error::{Result, WheelError};

/// Leading bytes of an xz stream.
pub const XZ_MAGIC: &[u8; 4] = b"\xfd7zX";
/// Leading bytes of a zip local file header.
pub const ZIP_MAGIC: &[u8; 4] = b"PK\x03\x04";

/// Lazily produced archive entries.
pub type Entries<'a> = Box<dyn Iterator<Item = Result<ArchiveEntry>> + 'a>;

/// Anything that can turn raw archive bytes into a sequence of regular files.
pub trait EntrySource {
    /// Starts iterating the archive. Can only be called once per source.
    fn entries(&mut self) -> Result<Entries<'_>>;
}

/// Container formats upstream ships its toolchains in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// xz-compressed tarball (`.tar.xz`).
    TarXz,
    /// Zip file (`.zip`).
    Zip,
}

impl ArchiveFormat {
    /// Identifies the container format from its first four bytes.
    pub fn detect(bytes: &[u8]) -> Result<Self> {
        let magic = &bytes[..bytes.len().min(4)];
        if magic == XZ_MAGIC {
            Ok(ArchiveFormat::TarXz)
        } else if magic == ZIP_MAGIC {
            Ok(ArchiveFormat::Zip)
        } else {
            Err(WheelError::UnsupportedFormat {
                magic: magic.to_vec(),
            })
        }
    }
}

/// Detects the format of `bytes` and returns a reader for it.
pub fn open(bytes: &[u8]) -> Result<Box<dyn EntrySource + '_>> {
    let source: Box<dyn EntrySource + '_> = match ArchiveFormat::detect(bytes)? {
        ArchiveFormat::TarXz => Box::new(TarXzSource::new(bytes)),
        ArchiveFormat::Zip => Box::new(ZipSource::new(bytes)?),
    };
    Ok(source)
}

/// Reads every regular file of an archive into memory.
pub fn read_all(bytes: &[u8]) -> Result<Vec<ArchiveEntry>> {
    let mut source = open(bytes)?;
    let entries = source.entries()?;
    entries.collect()
}
