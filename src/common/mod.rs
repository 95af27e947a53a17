//! Common utilities and types module.
// Shared structs and constants used by both the archive readers and the wheel writer.

/// Default permission bits for generated wheel members.
pub const DEFAULT_MODE: u32 = 0o644;

/// Permission bits of the `RECORD` manifest.
pub const RECORD_MODE: u32 = 0o664;

/// Type bits marking a regular file in a Unix mode.
pub const REGULAR_FILE: u32 = 0o100000;

/// Upper bound on buffer space reserved up front from a size an archive
/// header declares.
pub const PREALLOC_LIMIT: u64 = 64 << 20;

/// Initial capacity for reading a member whose header declares `declared` bytes.
pub fn capacity_hint(declared: u64) -> usize {
    declared.min(PREALLOC_LIMIT) as usize
}

/// A single regular file read out of an upstream archive, or destined for a wheel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Forward-slash separated path.
    pub path: String,
    /// Unix mode, including file type bits when the source carried them.
    pub mode: u32,
    pub data: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(path: impl Into<String>, mode: u32, data: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            mode,
            data: data.into(),
        }
    }

    /// A generated member with the default `0o644` permissions.
    pub fn generated(path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self::new(path, DEFAULT_MODE, data)
    }

    /// The last path component.
    pub fn file_name(&self) -> &str {
        base_name(&self.path)
    }
}

/// The last component of a forward-slash separated path.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Drops the first component of `path`, the directory upstream archives wrap
/// their contents in. Returns `None` when nothing is left.
pub fn strip_top_level(path: &str) -> Option<&str> {
    let (_, rest) = path.split_once('/')?;
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}
