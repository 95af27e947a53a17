use std::path::PathBuf;

use thiserror::Error;

/// The primary error type for all operations in the `zigwheel` crate.
#[derive(Debug, Error)]
pub enum WheelError {
    /// An I/O error occurred, typically while reading or writing a file.
    /// Includes the path where the error happened.
    #[error("I/O error on path '{}': {source}", .path.display())]
    Io { source: std::io::Error, path: PathBuf },

    /// The HTTP client failed before a response was received.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("download failed for {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    /// The downloaded archive does not hash to the value declared in the index.
    #[error("SHA256 hash mismatch for {url}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        url: String,
        expected: String,
        actual: String,
    },

    /// The leading bytes match neither an xz-compressed tarball nor a zip file.
    #[error("unsupported archive format (leading bytes {})", hex::encode(.magic))]
    UnsupportedFormat { magic: Vec<u8> },

    /// A tar entry could not be read.
    #[error("archive error: {0}")]
    Archive(String),

    /// A zip container could not be read or written.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Required license files are absent from the upstream archive.
    #[error(
        "the following required license files were not found in the archive: {}\n\
         This may indicate a change in the upstream license file structure or an error \
         in the listing of license files and/or paths.",
        .paths.join(", ")
    )]
    MissingLicenses { paths: Vec<String> },

    /// License-like files were found that are not declared in the package metadata.
    #[error(
        "found additional potential license files in the archive but not included in the metadata: {}\n\
         Please consider adding these to the license paths if they should be included.",
        .paths.join(", ")
    )]
    UnexpectedLicenses { paths: Vec<String> },

    /// The requested version is not a key of the version index.
    #[error("invalid version '{requested}', valid values: {}", .available.join(", "))]
    VersionNotFound {
        requested: String,
        available: Vec<String>,
    },

    /// The requested platform is not part of the platform table.
    #[error("unknown platform '{platform}', valid values: {}", .available.join(", "))]
    UnknownPlatform {
        platform: String,
        available: Vec<String>,
    },

    /// The version index has an unexpected shape.
    #[error("malformed version index: {0}")]
    IndexFormat(String),

    /// An error during deserialization of the version index.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The same path was written twice into one wheel.
    #[error("duplicate wheel entry '{0}'")]
    DuplicateEntry(String),

    /// The `RECORD` manifest could not be serialized.
    #[error("RECORD error: {0}")]
    Record(#[from] csv::Error),

    /// A license pattern failed to compile.
    #[error("invalid license pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WheelError>;

impl WheelError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WheelError::Io {
            source,
            path: path.into(),
        }
    }
}

// Generic IO error conversion that doesn't require a path
impl From<std::io::Error> for WheelError {
    fn from(err: std::io::Error) -> Self {
        WheelError::Io {
            source: err,
            path: PathBuf::new(),
        }
    }
}
