// ── Library discovery ─────────────────────────────────────────────────────────
//
// Pure read-only walk of the vendor package tree.  No FFI; usable from any
// module and testable on any host by passing an explicit `Platform`.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

// ── Platform tag ──────────────────────────────────────────────────────────────

/// Which shared-library naming convention (and activation strategy) applies.
///
/// Detected once per activation from the compile target; tests pass explicit
/// values to exercise every convention on any host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    /// Everything else.  No vendor-library convention; discovery yields
    /// nothing and activation is a no-op.
    Other,
}

impl Platform {
    /// The platform of the compile target.
    pub fn host() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }
}

// ── Matching rule ─────────────────────────────────────────────────────────────

/// Return `true` if `name` follows `platform`'s shared-library naming
/// convention.
///
/// Windows matching is case-insensitive: NTFS is case-insensitive, so
/// `CUDART64_12.DLL` and `cudart64_12.dll` name the same file.
pub(crate) fn is_shared_library(name: &str, platform: Platform) -> bool {
    match platform {
        Platform::Windows => name.to_ascii_lowercase().ends_with(".dll"),
        Platform::Linux => is_shared_object(name),
        Platform::Other => false,
    }
}

/// `libfoo.so`, or `libfoo.so.<digits>` with a single numeric soname
/// component.  `libfoo.so.1.2` does not match; vendor wheels ship the
/// one-component form (`libcudart.so.12`).
fn is_shared_object(name: &str) -> bool {
    if name.ends_with(".so") {
        return true;
    }
    match name.rfind(".so.") {
        Some(i) => {
            let version = &name[i + ".so.".len()..];
            !version.is_empty() && version.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

// ── Walk ──────────────────────────────────────────────────────────────────────

/// Walk `root` and return every file whose name matches `platform`'s
/// shared-library convention, sorted within each directory for a stable,
/// reproducible load order.
///
/// A missing or unreadable root yields an empty list — "no vendor libraries
/// installed" is not an error.  `Platform::Other` yields an empty list
/// regardless of the tree's contents.
pub fn discover(root: &Path, platform: Platform) -> Vec<PathBuf> {
    let mut found = Vec::new();
    if platform == Platform::Other {
        return found;
    }

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if is_shared_library(name, platform) {
            found.push(entry.into_path());
        }
    }

    debug!(
        root = %root.display(),
        count = found.len(),
        "shared-library discovery finished"
    );
    found
}

/// Parent directories of `paths`, deduplicated in first-seen order.
///
/// The Windows loader registers search paths per *directory*, not per file;
/// this collapses a directory full of DLLs into one registration.
pub fn parent_directories(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    for path in paths {
        if let Some(dir) = path.parent() {
            if !dirs.iter().any(|d| d == dir) {
                dirs.push(dir.to_path_buf());
            }
        }
    }
    dirs
}

// ── Tests ─────────────────────────────────────────────────────────────────────
