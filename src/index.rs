//! # Version Index
//!
//! Parses the upstream `index.json` and resolves a user request (`latest`,
//! `master`/`nightly` or an explicit version) to a concrete version record.
//!
//! The index is a JSON object keyed by version. `master` is the nightly build
//! and comes first; releases follow newest-first, which is why document order
//! is preserved while parsing.

use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Result, WheelError};

/// Key of the nightly build in the index.
pub const NIGHTLY_KEY: &str = "master";

/// What the user asked to package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRequest {
    /// Most recent release, i.e. the first non-nightly key.
    Latest,
    /// The nightly build.
    Nightly,
    /// A literal index key such as `0.13.0`.
    Exact(String),
}

impl VersionRequest {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "latest" => VersionRequest::Latest,
            "master" | "nightly" => VersionRequest::Nightly,
            other => VersionRequest::Exact(other.to_string()),
        }
    }
}

impl fmt::Display for VersionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRequest::Latest => f.write_str("latest"),
            VersionRequest::Nightly => f.write_str(NIGHTLY_KEY),
            VersionRequest::Exact(version) => f.write_str(version),
        }
    }
}

/// Where to download one platform's archive and what it must hash to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Download {
    pub tarball: String,
    pub shasum: String,
}

/// The parsed version index, in document order.
#[derive(Debug, Clone)]
pub struct VersionIndex {
    versions: Map<String, Value>,
}

impl VersionIndex {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        match value {
            Value::Object(versions) => Ok(Self { versions }),
            _ => Err(WheelError::IndexFormat(
                "top level is not an object".to_string(),
            )),
        }
    }

    /// Index keys in document order.
    pub fn keys(&self) -> Vec<String> {
        self.versions.keys().cloned().collect()
    }

    /// Looks up the record a request refers to.
    pub fn resolve(&self, request: &VersionRequest) -> Result<ResolvedVersion> {
        let key = match request {
            VersionRequest::Latest => self
                .versions
                .keys()
                .find(|key| key.as_str() != NIGHTLY_KEY)
                .cloned(),
            VersionRequest::Nightly => Some(NIGHTLY_KEY.to_string()),
            VersionRequest::Exact(version) => Some(version.clone()),
        };

        let not_found = || WheelError::VersionNotFound {
            requested: request.to_string(),
            available: self.keys(),
        };
        let key = key.ok_or_else(not_found)?;
        let record = match self.versions.get(&key) {
            Some(Value::Object(record)) => record.clone(),
            Some(_) => {
                return Err(WheelError::IndexFormat(format!(
                    "entry for {} is not an object",
                    key
                )))
            }
            None => return Err(not_found()),
        };

        let effective = record
            .get("version")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| key.clone());

        Ok(ResolvedVersion {
            key,
            effective,
            record,
        })
    }
}

/// A version record picked out of the index.
#[derive(Debug, Clone)]
pub struct ResolvedVersion {
    /// The index key (`master`, `0.13.0`, ...).
    pub key: String,
    /// Concrete version; differs from `key` for the nightly build.
    pub effective: String,
    record: Map<String, Value>,
}

impl ResolvedVersion {
    /// Download descriptor for a platform, `None` if this version doesn't ship it.
    pub fn download(&self, platform: &str) -> Result<Option<Download>> {
        match self.record.get(platform) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| {
                    WheelError::IndexFormat(format!(
                        "bad download entry for {} {}: {}",
                        self.key, platform, e
                    ))
                }),
        }
    }
}

/// Python-compatible wheel version: build metadata after `+` is dropped,
/// dashes become dots and `suffix` is appended.
pub fn wheel_version(effective: &str, suffix: &str) -> String {
    let base = effective.split('+').next().unwrap_or(effective);
    format!("{}{}", base.replace('-', "."), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"{
        "master": {
            "version": "0.14.0-dev.2+0123abcd",
            "date": "2024-06-01",
            "x86_64-linux": {"tarball": "https://example.invalid/zig-linux-x86_64-0.14.0-dev.2.tar.xz", "shasum": "aa", "size": "1"}
        },
        "0.13.0": {
            "date": "2024-06-07",
            "src": {"tarball": "https://example.invalid/zig-0.13.0.tar.xz", "shasum": "bb", "size": "2"},
            "x86_64-linux": {"tarball": "https://example.invalid/zig-linux-x86_64-0.13.0.tar.xz", "shasum": "cc", "size": "3"},
            "x86_64-windows": {"tarball": "https://example.invalid/zig-windows-x86_64-0.13.0.zip", "shasum": "dd", "size": "4"}
        },
        "0.12.0": {
            "x86_64-linux": {"tarball": "https://example.invalid/zig-linux-x86_64-0.12.0.tar.xz", "shasum": "ee", "size": "5"}
        }
    }"#;

    fn index() -> VersionIndex {
        VersionIndex::from_slice(INDEX.as_bytes()).unwrap()
    }

    #[test]
    fn download_ignores_size_and_extra_fields() {
        let index = VersionIndex::from_slice(
            br#"{"0.13.0": {"x86_64-linux": {"tarball": "t", "shasum": "s", "size": 48623672, "mirror": true}}}"#,
        )
        .unwrap();
        let resolved = index.resolve(&VersionRequest::Latest).unwrap();
        assert_eq!(
            resolved.download("x86_64-linux").unwrap(),
            Some(Download {
                tarball: "t".into(),
                shasum: "s".into(),
            })
        );
    }

    #[test]
    fn parses_requests() {
        assert_eq!(VersionRequest::parse("latest"), VersionRequest::Latest);
        assert_eq!(VersionRequest::parse("master"), VersionRequest::Nightly);
        assert_eq!(VersionRequest::parse("nightly"), VersionRequest::Nightly);
        assert_eq!(VersionRequest::parse("0.13.0"), VersionRequest::Exact("0.13.0".into()));
    }

    #[test]
    fn latest_is_first_non_nightly_key() {
        let resolved = index().resolve(&VersionRequest::Latest).unwrap();
        assert_eq!(resolved.key, "0.13.0");
        assert_eq!(resolved.effective, "0.13.0");
    }

    #[test]
    fn nightly_uses_embedded_version() {
        let resolved = index().resolve(&VersionRequest::Nightly).unwrap();
        assert_eq!(resolved.key, "master");
        assert_eq!(resolved.effective, "0.14.0-dev.2+0123abcd");
        assert_eq!(wheel_version(&resolved.effective, ""), "0.14.0.dev.2");
    }

    #[test]
    fn unknown_version_lists_choices() {
        let err = index()
            .resolve(&VersionRequest::Exact("9.9.9".into()))
            .unwrap_err();
        match err {
            WheelError::VersionNotFound { requested, available } => {
                assert_eq!(requested, "9.9.9");
                assert_eq!(available, ["master", "0.13.0", "0.12.0"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn absent_platform_is_none() {
        let resolved = index().resolve(&VersionRequest::Exact("0.12.0".into())).unwrap();
        assert_eq!(resolved.download("x86_64-windows").unwrap(), None);
        let download = resolved.download("x86_64-linux").unwrap().unwrap();
        assert_eq!(download.shasum, "ee");
    }

    #[test]
    fn malformed_index_is_rejected() {
        assert!(matches!(
            VersionIndex::from_slice(b"[1, 2]"),
            Err(WheelError::IndexFormat(_))
        ));
        assert!(matches!(VersionIndex::from_slice(b"{"), Err(WheelError::Json(_))));
    }

    #[test]
    fn wheel_version_suffix() {
        assert_eq!(wheel_version("0.13.0", ""), "0.13.0");
        assert_eq!(wheel_version("0.13.0", ".post1"), "0.13.0.post1");
    }
}
