// ── Diagnostic entry point ────────────────────────────────────────────────────
//
// `nvpreload [ROOT]` — activate the vendor libraries and list what was found.
// With no argument the root is resolved from the active Python environment;
// an explicit ROOT skips the environment lookup.  Exits 1 if any library
// fails to activate.

use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let result = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(root) => nvpreload::activate_from(root),
        None => nvpreload::activate(),
    };

    match result {
        Ok(paths) if paths.is_empty() => {
            println!("no vendor libraries found");
            ExitCode::SUCCESS
        }
        Ok(paths) => {
            for path in &paths {
                println!("{}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("nvpreload: {e}");
            ExitCode::FAILURE
        }
    }
}
