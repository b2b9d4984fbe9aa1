// ── Python environment resolution ─────────────────────────────────────────────
//
// Locates the active environment's primary site-packages directory, where the
// vendor wheels install their library trees.  Pure path probing against
// `$VIRTUAL_ENV` / `$CONDA_PREFIX`; no Python interpreter is invoked.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

/// `<site-packages>/nvidia` for the active Python environment.
///
/// Returns `None` when no environment is active or its layout is
/// unrecognized.  `None` is not an error: it flows into "no vendor libraries
/// found" upstream.
pub(crate) fn nvidia_root() -> Option<PathBuf> {
    let prefix = env::var_os("VIRTUAL_ENV").or_else(|| env::var_os("CONDA_PREFIX"))?;
    let root = site_packages_under(Path::new(&prefix))?.join("nvidia");
    debug!(root = %root.display(), "resolved vendor package root");
    Some(root)
}

/// Probe `prefix` for a site-packages directory.
///
/// Windows environments use `Lib\site-packages`; POSIX environments use
/// `lib/python3.X/site-packages`.  When several interpreter versions coexist
/// under one prefix, the lexically first match wins, mirroring the primary
/// site-packages entry being the one consulted.
pub(crate) fn site_packages_under(prefix: &Path) -> Option<PathBuf> {
    let windows_layout = prefix.join("Lib").join("site-packages");
    if windows_layout.is_dir() {
        return Some(windows_layout);
    }

    let mut candidates: Vec<PathBuf> = fs::read_dir(prefix.join("lib"))
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("python3"))
                && p.join("site-packages").is_dir()
        })
        .collect();
    candidates.sort();
    candidates.first().map(|p| p.join("site-packages"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
