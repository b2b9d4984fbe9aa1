// ── Linux loader activation ───────────────────────────────────────────────────
//
// This is one of exactly two modules in the crate where `unsafe` code is
// permitted (the other is `platform::win32`).  Every `unsafe` block MUST
// carry a `// SAFETY:` comment.
//
// Loaded handles are parked in a process-lifetime static and never dropped:
// `Library`'s Drop would dlclose, and the whole point of preloading is that
// the symbols stay resolvable until process exit.  Repeat activations append.

#![allow(unsafe_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use libloading::os::unix::{Library, RTLD_GLOBAL, RTLD_NOW};
use tracing::debug;

use crate::{
    discover::{discover, Platform},
    error::{PreloadError, Result},
    platform::Strategy,
};

/// Handles kept alive for the rest of the process.
static LOADED: Mutex<Vec<Library>> = Mutex::new(Vec::new());

/// Eagerly loads every discovered shared object into the process.
pub(crate) struct LinuxStrategy;

impl Strategy for LinuxStrategy {
    fn discover(&self, root: &Path) -> Vec<PathBuf> {
        discover(root, Platform::Linux)
    }

    fn activate(&self, paths: &[PathBuf]) -> Result<()> {
        // One load per file, in discovery order.  The first failure
        // propagates; entries loaded before it stay loaded.
        for path in paths {
            load_global(path)?;
        }
        Ok(())
    }
}

/// dlopen `path` with `RTLD_NOW | RTLD_GLOBAL` so its exported symbols are
/// visible to every library loaded afterwards, then park the handle.
fn load_global(path: &Path) -> Result<()> {
    // SAFETY: loading a shared object runs its initializers.  These files
    // come from the vendor package tree and are loaded precisely for that
    // side effect; no symbols are resolved through this handle.
    let lib = unsafe { Library::open(Some(path), RTLD_NOW | RTLD_GLOBAL) }.map_err(|e| {
        PreloadError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    debug!(path = %path.display(), "loaded shared library");
    LOADED
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .push(lib);
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
