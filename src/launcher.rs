//! Entry-point shim for the bundled native executable.
//!
//! The wheel ships the toolchain binary as package data, so `python -m ziglang`
//! and the `python-zig` console script need a small module that finds the
//! binary next to itself and hands the process over to it.

/// Whether `path` (relative to the namespace directory) is the main executable:
/// a top-level file whose name starts with `prefix`, e.g. `zig` or `zig.exe`.
pub fn is_main_executable(path: &str, prefix: &str) -> bool {
    !path.contains('/') && path.starts_with(prefix)
}

/// Source of `__main__.py` launching `exe_path`.
///
/// On POSIX the interpreter process is replaced with `execv`; elsewhere the
/// executable runs as a child and its exit status is propagated. Running the
/// module launches as a side effect of import, and the `dummy` function only
/// exists so the module can be named as a console-script entry point.
pub fn launcher_module(exe_path: &str) -> String {
    format!(
        r#"import os, sys
argv = [os.path.join(os.path.dirname(__file__), "{exe}"), *sys.argv[1:]]
if os.name == 'posix':
    os.execv(argv[0], argv)
else:
    import subprocess; sys.exit(subprocess.call(argv))

def dummy(): """Dummy function for an entrypoint. The executable runs as a side effect of the import."""
"#,
        exe = python_string_escape(exe_path)
    )
}

/// `module:function` target for the console script.
pub fn entry_point_target(namespace: &str) -> String {
    format!("{}.__main__:dummy", namespace)
}

fn python_string_escape(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}
