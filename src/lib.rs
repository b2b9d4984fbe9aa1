// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except:
//   • `platform::win32` – Win32 loader FFI (AddDllDirectory)
//   • `platform::linux` – dlopen via libloading
// Each unsafe block in those modules MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

//! Preloads vendor-provided CUDA shared libraries from the active Python
//! environment's `site-packages/nvidia/` tree, so a dependent native runtime
//! can resolve them at process start.
//!
//! On Windows every directory containing `.dll` files is registered as an
//! extra DLL search directory.  On Linux every matching shared object is
//! eagerly loaded with its symbols made visible process-wide.  Other
//! platforms are a deliberate no-op.
//!
//! Activation mutates process-wide dynamic-loader state that is never rolled
//! back, and repeat calls accumulate rather than deduplicate.  Call
//! [`activate`] exactly once, during process initialization.

mod error;
mod platform;
mod site;

pub mod discover;

pub use discover::{discover, parent_directories, Platform};
pub use error::{PreloadError, Result};

use std::path::{Path, PathBuf};

use tracing::debug;

/// Activate the vendor libraries for the active Python environment.
///
/// Resolves `<site-packages>/nvidia` from `$VIRTUAL_ENV` / `$CONDA_PREFIX`,
/// discovers the platform's shared libraries beneath it, and performs the
/// platform's activation action on each.  A missing environment or empty
/// tree is not an error; the result is simply empty.
///
/// Returns the discovered library paths, in activation order.
pub fn activate() -> Result<Vec<PathBuf>> {
    match site::nvidia_root() {
        Some(root) => activate_from(root),
        None => {
            debug!("no active Python environment; nothing to preload");
            Ok(Vec::new())
        }
    }
}

/// [`activate`] with an explicit vendor tree root instead of the environment
/// lookup.  Used by the diagnostic binary and by embedders that know where
/// the wheels landed.
pub fn activate_from(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let strategy = platform::strategy();
    platform::run(strategy.as_ref(), root.as_ref())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
