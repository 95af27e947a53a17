//! Turns one upstream archive into the full member list of a wheel.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::common::{strip_top_level, ArchiveEntry};
use crate::config::{wheel_tag, PackageConfig};
use crate::error::Result;
use crate::extract;
use crate::launcher;
use crate::license::{LicenseAuditor, LicenseFile};
use crate::wheel::{self, metadata};

/// Everything needed to serialize one wheel.
#[derive(Debug, Clone)]
pub struct WheelBuild {
    /// `<name>-<version>-py3-none-<platform>.whl`
    pub file_name: String,
    /// `<name>-<version>.dist-info`
    pub dist_info: String,
    /// Members in write order, `RECORD` excluded.
    pub entries: Vec<ArchiveEntry>,
}

impl WheelBuild {
    /// Serializes the wheel in memory.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        wheel::wheel_bytes(&self.entries, &self.dist_info)
    }

    /// Writes the wheel into `out_dir` and returns its path.
    pub fn write_to(&self, out_dir: &Path) -> Result<PathBuf> {
        let path = out_dir.join(&self.file_name);
        wheel::write_wheel_file(&path, &self.entries, &self.dist_info)?;
        info!(path = %path.display(), members = self.entries.len() + 1, "wrote wheel");
        Ok(path)
    }
}

/// Transcodes `archive` and assembles every wheel member for it.
///
/// Paths lose the archive's top-level directory and land under the namespace
/// directory; skipped prefixes are dropped before the license audit sees them.
pub fn assemble(
    config: &PackageConfig,
    version: &str,
    platform_tag: &str,
    archive: &[u8],
    description: &str,
) -> Result<WheelBuild> {
    let dist_info = config.dist_info(version);
    let namespace = config.namespace.as_str();

    let mut entries = vec![ArchiveEntry::generated(
        format!("{}/__init__.py", namespace),
        Vec::new(),
    )];
    let mut auditor = LicenseAuditor::new(
        config.license_patterns.as_slice(),
        config.required_license_paths.as_slice(),
    )?;
    let mut executable: Option<String> = None;

    let mut source = extract::open(archive)?;
    for entry in source.entries()? {
        let entry = entry?;
        let Some(path) = strip_top_level(&entry.path) else {
            continue;
        };
        if config.is_skipped(path) {
            continue;
        }

        auditor.observe(path, &entry.data);
        if launcher::is_main_executable(path, &config.executable_prefix) {
            executable = Some(path.to_string());
        }

        entries.push(ArchiveEntry::new(
            format!("{}/{}", namespace, path),
            entry.mode & 0xFFFF,
            entry.data,
        ));
    }

    let licenses = auditor.finish()?;
    debug!(count = licenses.len(), "license audit passed");

    match &executable {
        Some(exe) => entries.push(ArchiveEntry::generated(
            format!("{}/__main__.py", namespace),
            launcher::launcher_module(exe),
        )),
        None => warn!(
            prefix = %config.executable_prefix,
            "no executable found in archive, skipping launcher"
        ),
    }

    for license in &licenses {
        entries.push(ArchiveEntry::generated(
            format!("{}/licenses/{}/{}", dist_info, namespace, license.path),
            license.data.clone(),
        ));
    }

    let tag = wheel_tag(platform_tag);
    let entry_point = launcher::entry_point_target(namespace);
    entries.push(ArchiveEntry::generated(
        format!("{}/entry_points.txt", dist_info),
        metadata::entry_points(&[(config.console_script.as_str(), entry_point.as_str())]),
    ));
    entries.push(ArchiveEntry::generated(
        format!("{}/METADATA", dist_info),
        package_metadata(config, version, &licenses, description).to_bytes(),
    ));
    entries.push(ArchiveEntry::generated(
        format!("{}/WHEEL", dist_info),
        metadata::wheel_metadata(&config.generator, &tag).to_bytes(),
    ));

    Ok(WheelBuild {
        file_name: config.wheel_file_name(version, platform_tag),
        dist_info,
        entries,
    })
}

fn package_metadata(
    config: &PackageConfig,
    version: &str,
    licenses: &[LicenseFile],
    description: &str,
) -> metadata::MetadataRecord {
    let license_files: Vec<String> = licenses
        .iter()
        .map(|l| format!("{}/{}", config.namespace, l.path))
        .collect();

    metadata::package_metadata(
        &config.name,
        version,
        vec![
            ("Summary", config.summary.as_str().into()),
            (
                "Description-Content-Type",
                config.description_content_type.as_str().into(),
            ),
            ("License-Expression", config.license_expression.as_str().into()),
            ("License-File", license_files.into()),
            ("Classifier", config.classifiers.clone().into()),
            ("Project-URL", config.project_urls.clone().into()),
            ("Requires-Python", config.requires_python.as_str().into()),
        ],
        description,
    )
}
