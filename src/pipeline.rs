//! # Build Pipeline
//!
//! Index → resolve → download → verify → transcode → write, one platform at a
//! time. Any failure aborts the whole run; the only tolerated gap is a
//! platform the requested version doesn't ship, which is skipped with a
//! warning.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::PackageConfig;
use crate::error::{Result, WheelError};
use crate::fetch::{self, Fetcher};
use crate::fsx;
use crate::index::{self, VersionIndex, VersionRequest};
use crate::package;

/// Inputs of one run that aren't part of the package configuration.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub index_url: String,
    pub version: VersionRequest,
    /// Appended to the normalised version, e.g. `.post1`.
    pub suffix: String,
    pub out_dir: PathBuf,
    /// Upstream platform names; empty means every configured platform.
    pub platforms: Vec<String>,
    /// Long description for `METADATA`.
    pub description: String,
}

/// A wheel written by [`Pipeline::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltWheel {
    pub platform: String,
    pub path: PathBuf,
    /// Hex SHA-256 of the wheel file.
    pub sha256: String,
}

/// Drives a full run against a fixed configuration and byte source.
pub struct Pipeline<F: Fetcher> {
    config: PackageConfig,
    fetcher: F,
}

impl<F: Fetcher> Pipeline<F> {
    pub fn new(config: PackageConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &PackageConfig {
        &self.config
    }

    /// Builds one wheel per requested platform and returns them in order.
    pub fn run(&self, options: &RunOptions) -> Result<Vec<BuiltWheel>> {
        let platforms = self.select_platforms(&options.platforms)?;

        let index = VersionIndex::from_slice(&self.fetcher.fetch(&options.index_url)?)?;
        let resolved = index.resolve(&options.version)?;
        let version = index::wheel_version(&resolved.effective, &options.suffix);
        info!(
            requested = %options.version,
            resolved = %resolved.effective,
            wheel_version = %version,
            "resolved version"
        );

        fsx::ensure_dir(&options.out_dir)?;

        let mut built = Vec::new();
        for (platform, platform_tag) in platforms {
            let Some(download) = resolved.download(&platform)? else {
                warn!(
                    platform = %platform,
                    version = %resolved.key,
                    effective = %resolved.effective,
                    "platform not present for version, skipping"
                );
                continue;
            };

            let archive = self.fetcher.fetch(&download.tarball)?;
            let archive_sha = fetch::verify_sha256(&download.tarball, &archive, &download.shasum)?;
            println!("{} {}", archive_sha, download.tarball);

            let build = package::assemble(
                &self.config,
                &version,
                &platform_tag,
                &archive,
                &options.description,
            )?;
            let path = build.write_to(&options.out_dir)?;
            let sha256 = fetch::sha256_hex(&fsx::read(&path)?);
            println!("  {} {}", sha256, path.display());

            built.push(BuiltWheel {
                platform,
                path,
                sha256,
            });
        }
        Ok(built)
    }

    /// Pairs each requested platform with its wheel tag, rejecting unknown names.
    fn select_platforms(&self, requested: &[String]) -> Result<Vec<(String, String)>> {
        let table = &self.config.platforms;
        let names = if requested.is_empty() {
            table.names()
        } else {
            requested.to_vec()
        };

        names
            .into_iter()
            .map(|name| match table.wheel_tag(&name) {
                Some(tag) => Ok((name, tag.to_string())),
                None => Err(WheelError::UnknownPlatform {
                    platform: name,
                    available: table.names(),
                }),
            })
            .collect()
    }
}

/// Reads the long description, naming the file on failure.
pub fn read_description(path: &Path) -> Result<String> {
    fsx::read_to_string(path)
}
