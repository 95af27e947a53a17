//! Builders for fake upstream archives and version indexes.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Cursor, Write};

use zigwheel::config::REQUIRED_LICENSE_PATHS;
use zigwheel::fetch::Fetcher;
use zigwheel::WheelError;

/// (path below the top directory, mode, contents)
pub type FileSpec = (String, u32, Vec<u8>);

/// A small but complete toolchain tree: executable, std lib, docs and every
/// license file the official package expects.
pub fn zig_tree(executable: &str) -> Vec<FileSpec> {
    let mut files: Vec<FileSpec> = vec![
        (executable.to_string(), 0o755, b"\x7fELF fake zig".to_vec()),
        ("lib/std/std.zig".into(), 0o644, b"pub const io = @import(\"io.zig\");\n".to_vec()),
        ("lib/foo.h".into(), 0o644, b"#define FOO 1\n".to_vec()),
        ("doc/langref.html".into(), 0o644, b"<html></html>".to_vec()),
    ];
    for path in REQUIRED_LICENSE_PATHS {
        files.push((path.to_string(), 0o644, format!("license text of {}\n", path).into_bytes()));
    }
    files
}

pub fn tar_xz(top: &str, files: &[FileSpec]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());

    let mut dir = tar::Header::new_gnu();
    dir.set_size(0);
    dir.set_mode(0o755);
    dir.set_entry_type(tar::EntryType::Directory);
    dir.set_cksum();
    builder
        .append_data(&mut dir, format!("{}/", top), std::io::empty())
        .unwrap();

    for (path, mode, data) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(*mode);
        header.set_mtime(1_700_000_000);
        header.set_entry_type(tar::EntryType::Regular);
        header.set_cksum();
        builder
            .append_data(&mut header, format!("{}/{}", top, path), data.as_slice())
            .unwrap();
    }

    let tarball = builder.into_inner().unwrap();
    let mut encoder = xz2::write::XzEncoder::new(Vec::new(), 6);
    encoder.write_all(&tarball).unwrap();
    encoder.finish().unwrap()
}

pub fn zip(top: &str, files: &[FileSpec]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .add_directory(format!("{}/", top), zip::write::FileOptions::default())
        .unwrap();
    for (path, mode, data) in files {
        let options = zip::write::FileOptions::default().unix_permissions(*mode);
        writer.start_file(format!("{}/{}", top, path), options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Rewrites every central directory record of `zip` as if the archive had been
/// made on NTFS with no external attributes, the way some Windows tools do.
pub fn without_unix_attributes(zip: &[u8]) -> Vec<u8> {
    fn u16_at(b: &[u8], at: usize) -> usize {
        u16::from_le_bytes([b[at], b[at + 1]]) as usize
    }
    fn u32_at(b: &[u8], at: usize) -> usize {
        u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]]) as usize
    }

    let mut bytes = zip.to_vec();

    // end of central directory record, no archive comment
    let eocd = bytes.len() - 22;
    assert_eq!(&bytes[eocd..eocd + 4], b"PK\x05\x06");
    let count = u16_at(&bytes, eocd + 10);
    let mut at = u32_at(&bytes, eocd + 16);
    for _ in 0..count {
        assert_eq!(&bytes[at..at + 4], b"PK\x01\x02");
        bytes[at + 5] = 11; // "version made by" host: NTFS
        bytes[at + 38..at + 42].fill(0); // external attributes
        at += 46 + u16_at(&bytes, at + 28) + u16_at(&bytes, at + 30) + u16_at(&bytes, at + 32);
    }
    bytes
}

/// One download entry of a fake index.
pub struct Release<'a> {
    pub key: &'a str,
    pub effective: Option<&'a str>,
    /// (platform, url, sha256)
    pub downloads: Vec<(&'a str, String, String)>,
}

pub fn index_json(releases: &[Release<'_>]) -> Vec<u8> {
    let mut root = serde_json::Map::new();
    for release in releases {
        let mut record = serde_json::Map::new();
        if let Some(effective) = release.effective {
            record.insert("version".into(), effective.into());
        }
        record.insert("date".into(), "2024-06-07".into());
        for (platform, url, sha) in &release.downloads {
            record.insert(
                platform.to_string(),
                serde_json::json!({ "tarball": url, "shasum": sha, "size": "0" }),
            );
        }
        root.insert(release.key.to_string(), serde_json::Value::Object(record));
    }
    serde_json::to_vec_pretty(&serde_json::Value::Object(root)).unwrap()
}

/// Serves canned bytes by URL.
#[derive(Default)]
pub struct MemoryFetcher {
    pub files: HashMap<String, Vec<u8>>,
}

impl MemoryFetcher {
    pub fn with(mut self, url: &str, data: Vec<u8>) -> Self {
        self.files.insert(url.to_string(), data);
        self
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, WheelError> {
        self.files
            .get(url)
            .cloned()
            .ok_or_else(|| WheelError::DownloadFailed {
                url: url.to_string(),
                status: 404,
            })
    }
}

pub fn sha256(data: &[u8]) -> String {
    zigwheel::fetch::sha256_hex(data)
}
