use clap::builder::PossibleValuesParser;
use clap::Parser;
use std::path::PathBuf;

use crate::config::{DEFAULT_INDEX_URL, INDEX_URL_ENV, ZIG_PYTHON_PLATFORMS};

/// Repackage official Zig downloads as Python wheels.
#[derive(Parser, Debug, Clone)]
#[command(author, about, long_about = None)]
pub struct Args {
    /// Version to package: `latest` for the latest release, `master` (or `nightly`) for the nightly build, or an explicit version.
    #[arg(long = "version", default_value = "latest")]
    pub zig_version: String,

    /// Suffix appended to the wheel version (e.g. `.post1`).
    #[arg(long, default_value = "")]
    pub suffix: String,

    /// Directory the wheels are written to.
    #[arg(long, default_value = "dist/")]
    pub outdir: PathBuf,

    /// Platform to build for, can be repeated. Builds every known platform if omitted.
    #[arg(long = "platform", value_parser = platform_parser())]
    pub platforms: Vec<String>,

    /// File holding the long description embedded in the wheel metadata.
    #[arg(long, default_value = "README.pypi.md")]
    pub readme: PathBuf,

    /// Location of the version index (URL, `file://` URL or local path). Falls back to ZIGWHEEL_INDEX_URL.
    #[arg(long)]
    pub index_url: Option<String>,
}

fn platform_parser() -> PossibleValuesParser {
    PossibleValuesParser::new(ZIG_PYTHON_PLATFORMS.iter().map(|(name, _)| *name))
}

/// Gets the index location from the command-line option, the `ZIGWHEEL_INDEX_URL`
/// environment variable, or the official download index, in that order.
pub fn get_index_url_from_opt_or_env(index_url_opt: Option<String>) -> String {
    if let Some(url) = index_url_opt {
        return url;
    }
    if let Ok(url) = std::env::var(INDEX_URL_ENV) {
        if !url.is_empty() {
            return url;
        }
    }
    DEFAULT_INDEX_URL.to_string()
}

/// Parses command-line arguments using `clap`.
///
/// This is the main entry point for the CLI logic. Invalid arguments make clap
/// print its usage message and exit.
pub fn run() -> Result<Args, Box<dyn std::error::Error>> {
    let args = Args::parse();
    Ok(args)
}
