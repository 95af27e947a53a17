//! Immutable packaging configuration.
//!
//! Everything that describes *what* gets packaged (platform tags, license
//! bookkeeping, metadata fields) lives here as plain data and is handed to
//! the pipeline explicitly.

/// Location of the official Zig version index.
pub const DEFAULT_INDEX_URL: &str = "https://ziglang.org/download/index.json";

/// Environment variable overriding the index location.
pub const INDEX_URL_ENV: &str = "ZIGWHEEL_INDEX_URL";

/// Zig platform identifiers and the Python platform tags their wheels carry.
pub const ZIG_PYTHON_PLATFORMS: &[(&str, &str)] = &[
    ("x86_64-windows", "win_amd64"),
    ("aarch64-windows", "win_arm64"),
    ("x86-windows", "win32"),
    ("x86_64-macos", "macosx_12_0_x86_64"),
    ("aarch64-macos", "macosx_12_0_arm64"),
    (
        "i386-linux",
        "manylinux_2_12_i686.manylinux2010_i686.musllinux_1_1_i686",
    ),
    // i386 was renamed to x86 in 0.11.0
    (
        "x86-linux",
        "manylinux_2_12_i686.manylinux2010_i686.musllinux_1_1_i686",
    ),
    (
        "x86_64-linux",
        "manylinux_2_12_x86_64.manylinux2010_x86_64.musllinux_1_1_x86_64",
    ),
    (
        "aarch64-linux",
        "manylinux_2_17_aarch64.manylinux2014_aarch64.musllinux_1_1_aarch64",
    ),
    (
        "armv7a-linux",
        "manylinux_2_17_armv7l.manylinux2014_armv7l.musllinux_1_1_armv7l",
    ),
    (
        "powerpc64le-linux",
        "manylinux_2_17_ppc64le.manylinux2014_ppc64le.musllinux_1_1_ppc64le",
    ),
];

/// Standard license file name patterns. A file whose base name matches any of
/// these must be listed in [`REQUIRED_LICENSE_PATHS`].
pub const LICENSE_PATTERNS: &[&str] = &[
    r"COPYING.*",
    r"COPYRIGHT.*",
    r"COPYLEFT.*",
    r"LICEN[CS]E.*",
    r"LICEN[CS]E-.*",
    r"LICEN[CS]E\..*",
    r"PATENTS.*",
    r"NOTICE.*",
    r"LEGAL.*",
    r"AUTHORS.*",
    r"RIGHT*",
    r"PERMISSION*",
    r"THIRD[-_]PARTY[-_]LICENSES?.*",
    r"EULA*",
    r"MIT*",
    r"GPL*",
    r"AGPL*",
    r"LGPL*",
    r"APACHE*",
];

/// License files shipped in the official Zig archives, relative to the
/// archive's top-level directory.
pub const REQUIRED_LICENSE_PATHS: &[&str] = &[
    "LICENSE",
    "lib/libc/glibc/LICENSES",
    "lib/libc/mingw/COPYING",
    "lib/libc/musl/COPYRIGHT",
    "lib/libc/wasi/LICENSE",
    "lib/libc/wasi/LICENSE-APACHE",
    "lib/libc/wasi/LICENSE-APACHE-LLVM",
    "lib/libc/wasi/LICENSE-MIT",
    "lib/libc/wasi/libc-bottom-half/cloudlibc/LICENSE",
    "lib/libc/wasi/libc-top-half/musl/COPYRIGHT",
    "lib/libcxx/LICENSE.TXT",
    "lib/libcxxabi/LICENSE.TXT",
    "lib/libunwind/LICENSE.TXT",
];

const CLASSIFIERS: &[&str] = &[
    "Development Status :: 4 - Beta",
    "Intended Audience :: Developers",
    "Topic :: Software Development :: Compilers",
    "Topic :: Software Development :: Code Generators",
    "Topic :: Software Development :: Build Tools",
    "Programming Language :: Other",
    "Programming Language :: Other Scripting Engines",
];

const PROJECT_URLS: &[&str] = &[
    "Homepage, https://ziglang.org",
    "Source Code, https://github.com/ziglang/zig-pypi",
    "Bug Tracker, https://github.com/ziglang/zig-pypi/issues",
];

/// Ordered mapping from upstream platform identifier to wheel platform tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformTable {
    entries: Vec<(String, String)>,
}

impl PlatformTable {
    pub fn new<I, A, B>(entries: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(a, b)| (a.into(), b.into()))
                .collect(),
        }
    }

    /// Returns the wheel platform tag for an upstream platform, if known.
    pub fn wheel_tag(&self, platform: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == platform)
            .map(|(_, tag)| tag.as_str())
    }

    /// Upstream platform names in table order.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }
}

impl Default for PlatformTable {
    fn default() -> Self {
        Self::new(ZIG_PYTHON_PLATFORMS.iter().copied())
    }
}

/// Everything needed to turn one upstream archive into a wheel, apart from
/// the archive itself and its version.
#[derive(Debug, Clone)]
pub struct PackageConfig {
    /// Distribution name, also used for the `.dist-info` directory.
    pub name: String,
    /// Top-level directory inside the wheel holding the toolchain files.
    pub namespace: String,
    /// Top-level file name prefix identifying the native executable.
    pub executable_prefix: String,
    /// Archive paths (after stripping the top directory) left out of the wheel.
    pub skip_prefixes: Vec<String>,
    pub license_patterns: Vec<String>,
    pub required_license_paths: Vec<String>,
    pub license_expression: String,
    pub summary: String,
    pub description_content_type: String,
    pub classifiers: Vec<String>,
    pub project_urls: Vec<String>,
    pub requires_python: String,
    /// Value of the `Generator` field in the `WHEEL` file.
    pub generator: String,
    /// Console script name pointing at the launcher's entry function.
    pub console_script: String,
    pub platforms: PlatformTable,
}

impl PackageConfig {
    /// The `ziglang` distribution as published on PyPI.
    pub fn ziglang() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            name: "ziglang".into(),
            namespace: "ziglang".into(),
            executable_prefix: "zig".into(),
            skip_prefixes: vec!["doc/".into()],
            license_patterns: owned(LICENSE_PATTERNS),
            required_license_paths: owned(REQUIRED_LICENSE_PATHS),
            license_expression: "MIT".into(),
            summary: "Zig is a general-purpose programming language and toolchain for \
                      maintaining robust, optimal, and reusable software."
                .into(),
            description_content_type: "text/markdown".into(),
            classifiers: owned(CLASSIFIERS),
            project_urls: owned(PROJECT_URLS),
            requires_python: "~=3.5".into(),
            generator: format!("zigwheel {}", env!("CARGO_PKG_VERSION")),
            console_script: "python-zig".into(),
            platforms: PlatformTable::default(),
        }
    }

    /// `<name>-<version>.dist-info`
    pub fn dist_info(&self, version: &str) -> String {
        format!("{}-{}.dist-info", self.name, version)
    }

    /// `<name>-<version>-py3-none-<platform tag>.whl`
    pub fn wheel_file_name(&self, version: &str, platform_tag: &str) -> String {
        format!("{}-{}-{}.whl", self.name, version, wheel_tag(platform_tag))
    }

    /// Whether an archive path (already stripped of its top directory) is left out.
    pub fn is_skipped(&self, path: &str) -> bool {
        self.skip_prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self::ziglang()
    }
}

/// Full compatibility tag for a platform-specific, Python-agnostic wheel.
pub fn wheel_tag(platform_tag: &str) -> String {
    format!("py3-none-{}", platform_tag)
}
