//! # Wheel Container
//!
//! Serializes wheel members into a zip file that is byte-for-byte reproducible:
//! every member is deflated, stamped with the same modification time
//! (1980-01-01 00:00:00, the earliest a zip can express) and marked as created
//! on Unix. The `RECORD` manifest is derived from what was actually written.

pub mod metadata;

use std::collections::HashSet;
use std::io::{Seek, Write};
use std::path::Path;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};
use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::common::{ArchiveEntry, RECORD_MODE};
use crate::error::{Result, WheelError};
use crate::fsx;

/// Streams members into a wheel and keeps the bookkeeping for `RECORD`.
pub struct WheelWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    record: Vec<RecordLine>,
    seen: HashSet<String>,
}

struct RecordLine {
    path: String,
    digest: String,
    size: usize,
}

impl<W: Write + Seek> WheelWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            record: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Writes one member. Only the permission bits of `entry.mode` are kept.
    pub fn write_entry(&mut self, entry: &ArchiveEntry) -> Result<()> {
        self.write_raw(&entry.path, entry.mode, &entry.data)?;
        self.record.push(RecordLine {
            path: entry.path.clone(),
            digest: record_digest(&entry.data),
            size: entry.data.len(),
        });
        Ok(())
    }

    /// Writes `<dist_info>/RECORD` and finalizes the zip, returning the sink.
    pub fn finish(mut self, dist_info: &str) -> Result<W> {
        let record_path = format!("{}/RECORD", dist_info);
        let manifest = record_csv(&self.record, &record_path)?;

        self.write_raw(&record_path, RECORD_MODE, &manifest)?;
        debug!(members = self.record.len() + 1, "finalizing wheel");
        Ok(self.zip.finish()?)
    }

    fn write_raw(&mut self, path: &str, mode: u32, data: &[u8]) -> Result<()> {
        if !self.seen.insert(path.to_string()) {
            return Err(WheelError::DuplicateEntry(path.to_string()));
        }
        self.zip.start_file(path, member_options(mode))?;
        self.zip.write_all(data)?;
        Ok(())
    }
}

/// Options shared by every member: deflate, pinned timestamp, given permissions.
fn member_options(mode: u32) -> FileOptions {
    FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(mode & 0o7777)
}

/// Renders `RECORD`: one `path,sha256=<digest>,size` row per member, quoted
/// where needed, then the manifest's own row with empty hash and size.
fn record_csv(lines: &[RecordLine], record_path: &str) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for line in lines {
        let hash = format!("sha256={}", line.digest);
        let size = line.size.to_string();
        writer.write_record([line.path.as_str(), hash.as_str(), size.as_str()])?;
    }
    writer.write_record([record_path, "", ""])?;
    writer
        .into_inner()
        .map_err(|e| WheelError::from(e.into_error()))
}

/// `RECORD` hash field: urlsafe base64 of the SHA-256 digest without padding.
pub fn record_digest(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(data))
}

/// Writes `entries` followed by `RECORD` into an in-memory wheel.
pub fn wheel_bytes(entries: &[ArchiveEntry], dist_info: &str) -> Result<Vec<u8>> {
    let mut writer = WheelWriter::new(std::io::Cursor::new(Vec::new()));
    for entry in entries {
        writer.write_entry(entry)?;
    }
    Ok(writer.finish(dist_info)?.into_inner())
}

/// Writes a wheel to `path`. Nothing appears at `path` unless every member
/// was written successfully.
pub fn write_wheel_file(path: &Path, entries: &[ArchiveEntry], dist_info: &str) -> Result<()> {
    fsx::write_atomically(path, |file| {
        let mut writer = WheelWriter::new(file);
        for entry in entries {
            writer.write_entry(entry)?;
        }
        writer.finish(dist_info)?;
        Ok(())
    })
}
