// ── Platform abstraction layer ────────────────────────────────────────────────
//
// This module defines the interface the rest of the crate uses to talk to the
// OS dynamic loader.  No `unsafe` lives here; all loader FFI is confined to
// the `win32` and `linux` sub-modules and never leaks outward.
//
// Each platform is a strategy selected once per activation, instead of
// branching on the OS at every step.

#[cfg(target_os = "linux")]
pub(crate) mod linux;
#[cfg(windows)]
pub(crate) mod win32;

use std::path::{Path, PathBuf};

use crate::error::Result;

// ── Strategy interface ────────────────────────────────────────────────────────

/// Platform-specific discovery and activation, selected once by [`strategy`].
pub(crate) trait Strategy {
    /// Matching shared-library files under `root`, in load order.  Empty when
    /// the root is missing or the platform has no vendor-library convention.
    fn discover(&self, root: &Path) -> Vec<PathBuf>;

    /// Make the discovered libraries resolvable by the dynamic loader.
    ///
    /// Mutates process-wide loader state (search path or loaded-symbol table)
    /// for the remainder of the process lifetime; nothing is rolled back, and
    /// repeat calls accumulate.  The first per-entry failure propagates.
    fn activate(&self, paths: &[PathBuf]) -> Result<()>;
}

/// Strategy for platforms without a vendor-library convention: discovers
/// nothing, activates nothing.
// Only selected on targets that are neither Windows nor Linux; elsewhere it
// exists for the tests below.
#[cfg_attr(any(windows, target_os = "linux"), allow(dead_code))]
pub(crate) struct NullStrategy;

impl Strategy for NullStrategy {
    fn discover(&self, _root: &Path) -> Vec<PathBuf> {
        Vec::new()
    }

    fn activate(&self, _paths: &[PathBuf]) -> Result<()> {
        Ok(())
    }
}

// ── Selection and pipeline ────────────────────────────────────────────────────

/// The compile target's strategy.
pub(crate) fn strategy() -> Box<dyn Strategy> {
    #[cfg(windows)]
    {
        Box::new(win32::WindowsStrategy)
    }
    #[cfg(target_os = "linux")]
    {
        Box::new(linux::LinuxStrategy)
    }
    #[cfg(not(any(windows, target_os = "linux")))]
    {
        Box::new(NullStrategy)
    }
}

/// Discover under `root`, then activate everything found, in discovery order.
/// Returns the discovered paths so callers can report what was activated.
pub(crate) fn run(strategy: &dyn Strategy, root: &Path) -> Result<Vec<PathBuf>> {
    let paths = strategy.discover(root);
    strategy.activate(&paths)?;
    Ok(paths)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PreloadError;
    use std::cell::RefCell;

    /// Test double that records every call in order.
    struct Recording {
        discovered: Vec<PathBuf>,
        fail_on: Option<usize>,
        log: RefCell<Vec<String>>,
    }

    impl Recording {
        fn new(discovered: Vec<PathBuf>) -> Self {
            Self {
                discovered,
                fail_on: None,
                log: RefCell::new(Vec::new()),
            }
        }
    }

    impl Strategy for Recording {
        fn discover(&self, root: &Path) -> Vec<PathBuf> {
            self.log
                .borrow_mut()
                .push(format!("discover {}", root.display()));
            self.discovered.clone()
        }

        fn activate(&self, paths: &[PathBuf]) -> Result<()> {
            for (i, p) in paths.iter().enumerate() {
                if self.fail_on == Some(i) {
                    return Err(PreloadError::Load {
                        path: p.clone(),
                        message: "simulated loader failure".to_owned(),
                    });
                }
                self.log
                    .borrow_mut()
                    .push(format!("activate {}", p.display()));
            }
            Ok(())
        }
    }

    #[test]
    fn run_discovers_then_activates_each_entry_in_order() {
        let paths = vec![
            PathBuf::from("/pkg/nvidia/lib64/libcudart.so.12"),
            PathBuf::from("/pkg/nvidia/lib64/libcublas.so.12"),
        ];
        let strategy = Recording::new(paths.clone());

        let out = run(&strategy, Path::new("/pkg/nvidia")).expect("run");
        assert_eq!(out, paths);
        assert_eq!(
            *strategy.log.borrow(),
            vec![
                "discover /pkg/nvidia".to_owned(),
                "activate /pkg/nvidia/lib64/libcudart.so.12".to_owned(),
                "activate /pkg/nvidia/lib64/libcublas.so.12".to_owned(),
            ]
        );
    }

    #[test]
    fn run_with_empty_discovery_activates_nothing() {
        let strategy = Recording::new(Vec::new());
        let out = run(&strategy, Path::new("/pkg/nvidia")).expect("run");
        assert!(out.is_empty());
        assert_eq!(*strategy.log.borrow(), vec!["discover /pkg/nvidia".to_owned()]);
    }

    #[test]
    fn run_surfaces_activation_failure() {
        let paths = vec![
            PathBuf::from("/pkg/nvidia/lib64/libcudart.so.12"),
            PathBuf::from("/pkg/nvidia/lib64/libcublas.so.12"),
        ];
        let mut strategy = Recording::new(paths);
        strategy.fail_on = Some(1);

        let err = run(&strategy, Path::new("/pkg/nvidia")).expect_err("must fail");
        assert!(err.to_string().contains("libcublas.so.12"), "{err}");
        // The entry before the failure was still activated.
        assert!(strategy
            .log
            .borrow()
            .contains(&"activate /pkg/nvidia/lib64/libcudart.so.12".to_owned()));
    }

    #[test]
    fn null_strategy_discovers_and_does_nothing() {
        let strategy = NullStrategy;
        assert!(strategy.discover(Path::new("/pkg/nvidia")).is_empty());
        assert!(strategy.activate(&[]).is_ok());
    }
}
