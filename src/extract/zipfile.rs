use std::io::{Cursor, Read};

use zip::ZipArchive;

use super::{Entries, EntrySource};
use crate::common::{capacity_hint, ArchiveEntry, DEFAULT_MODE, REGULAR_FILE};
use crate::error::{Result, WheelError};

/// Reads regular files out of a zip archive, in central directory order.
pub struct ZipSource<'a> {
    archive: ZipArchive<Cursor<&'a [u8]>>,
}

impl<'a> ZipSource<'a> {
    /// Parses the central directory. Fails on anything that isn't a zip file.
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        Ok(Self {
            archive: ZipArchive::new(Cursor::new(bytes))?,
        })
    }
}

impl<'a> EntrySource for ZipSource<'a> {
    fn entries(&mut self) -> Result<Entries<'_>> {
        let archive = &mut self.archive;
        let count = archive.len();

        Ok(Box::new((0..count).filter_map(move |index| {
            let mut file = match archive.by_index(index) {
                Ok(file) => file,
                Err(e) => return Some(Err(e.into())),
            };
            if file.is_dir() {
                return None;
            }

            let path = file.name().to_string();
            // Archives written on Windows carry no Unix attributes.
            let mode = file.unix_mode().unwrap_or(REGULAR_FILE | DEFAULT_MODE);

            let mut data = Vec::with_capacity(capacity_hint(file.size()));
            if let Err(e) = file.read_to_end(&mut data) {
                return Some(Err(WheelError::Archive(format!(
                    "failed to read {}: {}",
                    path, e
                ))));
            }
            Some(Ok(ArchiveEntry::new(path, mode, data)))
        })))
    }
}
