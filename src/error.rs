// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations in nvpreload return `error::Result<T>`.  No panics
// in production paths; the diagnostic binary prints the error and exits
// nonzero, library callers get it through `?`.

use std::path::PathBuf;

/// Every error that nvpreload can produce.
///
/// Discovery itself is infallible (a missing tree is "nothing to preload");
/// only the activation step can fail.
#[derive(Debug)]
pub enum PreloadError {
    /// A Win32 loader call returned a failure code.
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw Win32 error code (`GetLastError()` value).
        code: u32,
    },

    /// The dynamic loader rejected a shared-library file.
    Load {
        /// The file that failed to load.
        path: PathBuf,
        /// The loader's own description of the failure (`dlerror` text).
        message: String,
    },
}

impl std::fmt::Display for PreloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Win32 { function, code } => {
                write!(f, "{function} failed (error {code:#010x})")
            }
            Self::Load { path, message } => {
                write!(f, "failed to load {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for PreloadError {}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PreloadError>;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win32_display_shows_function_and_hex_code() {
        let e = PreloadError::Win32 {
            function: "AddDllDirectory",
            code: 5,
        };
        let msg = e.to_string();
        assert!(msg.contains("AddDllDirectory"), "{msg}");
        assert!(msg.contains("0x00000005"), "{msg}");
    }

    #[test]
    fn load_display_shows_path_and_loader_message() {
        let e = PreloadError::Load {
            path: PathBuf::from("/opt/libs/libcudart.so.12"),
            message: "invalid ELF header".to_owned(),
        };
        let msg = e.to_string();
        assert!(msg.contains("libcudart.so.12"), "{msg}");
        assert!(msg.contains("invalid ELF header"), "{msg}");
    }
}
