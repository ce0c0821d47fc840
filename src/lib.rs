//! Cross-platform single-file executable builder
//!
//! This library drives PyInstaller to turn the meeting extractor script into
//! one self-contained executable per host platform:
//! - Windows (`meeting_extractor_windows.exe`)
//! - macOS (`meeting_extractor_macos`)
//! - Linux (`meeting_extractor_linux`)
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
