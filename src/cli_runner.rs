//! CLI runner shared by the `zigwheel` binary and the integration tests.
//!
//! Turns parsed [`Args`](crate::cli::Args) into a [`RunOptions`] and drives the
//! pipeline with the official package configuration and an HTTP fetcher.

use crate::cli::{self, Args};
use crate::config::PackageConfig;
use crate::fetch::HttpFetcher;
use crate::index::VersionRequest;
use crate::pipeline::{self, BuiltWheel, Pipeline, RunOptions};

/// Public entry for running CLI logic.
pub fn run_cli_app() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::run()?;
    let built = run_with_args(args)?;
    if built.is_empty() {
        tracing::warn!("no wheels were built");
    }
    Ok(())
}

/// Runs the pipeline for already parsed arguments.
pub fn run_with_args(args: Args) -> Result<Vec<BuiltWheel>, crate::WheelError> {
    let description = pipeline::read_description(&args.readme)?;
    let options = RunOptions {
        index_url: cli::get_index_url_from_opt_or_env(args.index_url),
        version: VersionRequest::parse(&args.zig_version),
        suffix: args.suffix,
        out_dir: args.outdir,
        platforms: args.platforms,
        description,
    };

    let pipeline = Pipeline::new(PackageConfig::ziglang(), HttpFetcher::new()?);
    pipeline.run(&options)
}
