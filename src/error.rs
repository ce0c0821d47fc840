//! Top-level error types for the command line.
//!
//! Build and clean failures are reported by the pipeline itself and surface
//! only as exit codes; these errors cover what stops the CLI before a mode
//! runs.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            BundlerError::Cli(CliError::InvalidArguments { .. }) => {
                vec!["Run with --help to see the available options".to_string()]
            }
            BundlerError::Bundler(crate::bundler::Error::Fs { .. }) => vec![
                "Check that --project-dir (or ONEFILE_PROJECT_DIR) points to an existing directory"
                    .to_string(),
            ],
            BundlerError::Bundler(_) => {
                vec!["Check the error message above for specific details".to_string()]
            }
        }
    }
}
