use std::io::Read;

use xz2::read::XzDecoder;

use super::{Entries, EntrySource};
use crate::common::{capacity_hint, ArchiveEntry, REGULAR_FILE};
use crate::error::{Result, WheelError};

/// Streams regular files out of an xz-compressed tarball.
pub struct TarXzSource<'a> {
    archive: tar::Archive<XzDecoder<&'a [u8]>>,
}

impl<'a> TarXzSource<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            archive: tar::Archive::new(XzDecoder::new(bytes)),
        }
    }
}

impl<'a> EntrySource for TarXzSource<'a> {
    fn entries(&mut self) -> Result<Entries<'_>> {
        let entries = self
            .archive
            .entries()
            .map_err(|e| WheelError::Archive(format!("tar read failed: {}", e)))?;

        Ok(Box::new(entries.filter_map(|entry| {
            let mut entry = match entry {
                Ok(entry) => entry,
                Err(e) => return Some(Err(WheelError::Archive(format!("tar entry: {}", e)))),
            };
            if !is_regular(entry.header().entry_type()) {
                return None;
            }
            Some(read_entry(&mut entry))
        })))
    }
}

/// Plain, contiguous and GNU sparse entries all carry file data.
fn is_regular(kind: tar::EntryType) -> bool {
    kind.is_file() || kind.is_contiguous() || kind.is_gnu_sparse()
}

fn read_entry<R: Read>(entry: &mut tar::Entry<'_, R>) -> Result<ArchiveEntry> {
    let path = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
    let mode = entry
        .header()
        .mode()
        .map_err(|e| WheelError::Archive(format!("bad mode for {}: {}", path, e)))?;

    let size = entry.size();
    let mut data = Vec::with_capacity(capacity_hint(size));
    entry
        .read_to_end(&mut data)
        .map_err(|e| WheelError::Archive(format!("failed to read {}: {}", path, e)))?;
    if data.len() as u64 != size {
        return Err(WheelError::Archive(format!(
            "{} is truncated: header declares {} bytes, archive holds {}",
            path,
            size,
            data.len()
        )));
    }

    Ok(ArchiveEntry::new(path, mode | REGULAR_FILE, data))
}
