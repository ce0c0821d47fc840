//! Kodegen Bundler Onefile - single-file executable builder.
//!
//! This binary checks the PyInstaller toolchain, builds a standalone
//! executable for the host platform and reports where it landed.

use kodegen_bundler_onefile::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  {}", suggestion);
            }
            1
        }
    };

    process::exit(exit_code);
}
