//! Error types for bundling operations.
//!
//! Every failure inside [`crate::bundler`] is expressed as an [`Error`]. The
//! build pipeline folds these into console reports at its boundaries, so the
//! variants carry enough context to print an actionable message on their own.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for bundler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while checking, building, reporting or cleaning.
#[derive(Error, Debug)]
pub enum Error {
    /// A pre-flight check rejected the build before anything was spawned.
    #[error("pre-flight check failed: {reason}")]
    Preflight {
        /// What was missing or too old
        reason: String,
        /// Remediation hint shown to the operator
        hint: String,
    },

    /// The external command could not be started at all.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Program that failed to start
        command: String,
        /// Underlying spawn error
        #[source]
        error: std::io::Error,
    },

    /// The external command ran but exited unsuccessfully.
    #[error("`{command}` exited with {}", .exit_code.map_or_else(|| "a signal".to_string(), |c| format!("code {c}")))]
    InvocationFailed {
        /// Program that failed
        command: String,
        /// Exit code, absent when terminated by a signal
        exit_code: Option<i32>,
    },

    /// Filesystem error with the path and operation that caused it.
    #[error("{context} `{}`: {error}", .path.display())]
    Fs {
        /// Operation being performed
        context: &'static str,
        /// Path being operated on
        path: PathBuf,
        /// Underlying IO error
        #[source]
        error: std::io::Error,
    },

    /// Invalid glob pattern
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Unreadable glob entry
    #[error("{0}")]
    Glob(#[from] glob::GlobError),

    /// Version string could not be parsed
    #[error("invalid version: {0}")]
    Version(#[from] semver::Error),

    /// Anything else
    #[error("{0}")]
    GenericError(String),
}

/// Adds filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Attach the operation and path to an IO error.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Return early with an [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
