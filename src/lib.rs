//! # zigwheel Core Library
//!
//! This crate repackages official Zig toolchain downloads as Python wheels,
//! one per target platform.
//!
//! It is designed to be used by the `zigwheel` command-line application, but its public API
//! can also be used to build wheels programmatically, e.g. from a local mirror.
//!
//! ## Key Modules
//!
//! - [`index`]: Parses the upstream version index and resolves version requests.
//! - [`fetch`]: Downloads archives and verifies their SHA-256.
//! - [`extract`]: Reads `.tar.xz` and `.zip` archives into entries.
//! - [`package`]: Maps archive entries to wheel members, injects the launcher, audits licenses.
//! - [`wheel`]: Writes reproducible wheel files and their metadata records.
//! - [`pipeline`]: Ties everything together for a set of platforms.
//!
//! ## Examples
//!
//! ```no_run
//! use zigwheel::config::PackageConfig;
//! use zigwheel::package;
//!
//! let archive = std::fs::read("zig-linux-x86_64-0.13.0.tar.xz")?;
//! let build = package::assemble(
//!     &PackageConfig::ziglang(),
//!     "0.13.0",
//!     "manylinux_2_12_x86_64.manylinux2010_x86_64.musllinux_1_1_x86_64",
//!     &archive,
//!     "Zig packaged for PyPI.",
//! )?;
//! build.write_to(std::path::Path::new("dist"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod cli_runner;
pub mod common;
pub mod config;
pub mod error;
pub use error::WheelError;

pub mod extract;
pub mod fetch;
pub mod index;
pub mod launcher;
pub mod license;
pub mod package;
pub mod pipeline;
pub mod wheel;

// Filesystem helpers with path-carrying errors
pub mod fsx;
