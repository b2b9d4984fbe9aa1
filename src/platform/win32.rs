// ── Win32 loader registration ─────────────────────────────────────────────────
//
// This is one of exactly two modules in the crate where `unsafe` code is
// permitted (the other is `platform::linux`).  Every `unsafe` block MUST
// carry a `// SAFETY:` comment.
//
// AddDllDirectory returns a cookie usable with RemoveDllDirectory; we discard
// it.  Registrations are cumulative, process-lifetime state that is never
// rolled back.  Note the added directories only participate in searches that
// use LOAD_LIBRARY_SEARCH_USER_DIRS (or a process-wide
// SetDefaultDllDirectories that includes it), which is how dependent CUDA
// runtimes resolve their vendor DLLs.

#![allow(unsafe_code)]

use std::iter;
use std::os::windows::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use tracing::debug;
use windows::{
    core::PCWSTR,
    Win32::{Foundation::GetLastError, System::LibraryLoader::AddDllDirectory},
};

use crate::{
    discover::{discover, parent_directories, Platform},
    error::{PreloadError, Result},
    platform::Strategy,
};

/// Registers every DLL-bearing directory with the Windows loader.
pub(crate) struct WindowsStrategy;

impl Strategy for WindowsStrategy {
    fn discover(&self, root: &Path) -> Vec<PathBuf> {
        discover(root, Platform::Windows)
    }

    fn activate(&self, paths: &[PathBuf]) -> Result<()> {
        // Registration granularity is the directory; one call per unique
        // parent, in first-seen order.
        for dir in parent_directories(paths) {
            add_dll_directory(&dir)?;
        }
        Ok(())
    }
}

/// Append `dir` to the loader's DLL search path for the rest of the process
/// lifetime.
fn add_dll_directory(dir: &Path) -> Result<()> {
    let wide: Vec<u16> = dir
        .as_os_str()
        .encode_wide()
        .chain(iter::once(0))
        .collect();

    // SAFETY: wide is a valid null-terminated UTF-16 path that outlives the
    // call.  AddDllDirectory copies the string; it does not retain our buffer.
    let cookie = unsafe { AddDllDirectory(PCWSTR(wide.as_ptr())) };
    if cookie.is_null() {
        // SAFETY: GetLastError reads thread-local state set by the just-failed
        // AddDllDirectory; no Win32 calls in between.
        let code = unsafe { GetLastError().0 };
        return Err(PreloadError::Win32 {
            function: "AddDllDirectory",
            code,
        });
    }

    debug!(dir = %dir.display(), "registered DLL search directory");
    Ok(())
}
