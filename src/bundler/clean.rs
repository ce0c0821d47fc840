//! Removal of transient build artifacts.
//!
//! Cleaning is independent of build success and safe to repeat: items that
//! do not exist are skipped, and a failure on one item is reported without
//! stopping the rest.

use super::utils::fs::{Removed, remove_path};
use super::{Result, Settings};
use crate::cli::OutputManager;
use glob::Pattern;
use std::path::{Path, PathBuf};

/// Removes the build directory, the dist directory, the runtime cache and
/// every generated spec file in the project root.
///
/// Prints one line per removed item and returns the removed paths.
pub async fn clean(settings: &Settings, output: &OutputManager) -> Vec<PathBuf> {
    output.progress("Cleaning build files...");

    let mut targets = vec![
        settings.build_dir().to_path_buf(),
        settings.dist_dir().to_path_buf(),
        settings.cache_dir().to_path_buf(),
    ];
    match spec_files(settings) {
        Ok(files) => targets.extend(files),
        Err(e) => {
            log::warn!("Skipping spec files: {e}");
            output.warn(&format!("Could not list spec files: {e}"));
        }
    }

    let mut removed = Vec::new();
    for relative in targets {
        let path = settings.project_path(&relative);
        match remove_path(&path).await {
            Ok(Removed::Directory) => {
                output.indent(&format!("Removed directory: {}", relative.display()));
                removed.push(path);
            }
            Ok(Removed::File) => {
                output.indent(&format!("Removed file: {}", relative.display()));
                removed.push(path);
            }
            Ok(Removed::Nothing) => log::debug!("Nothing to remove at {}", path.display()),
            Err(e) => {
                log::warn!("{e}");
                output.warn(&e.to_string());
            }
        }
    }

    output.success("Clean complete");
    removed
}

/// Spec files in the project root, relative to it, in sorted order.
fn spec_files(settings: &Settings) -> Result<Vec<PathBuf>> {
    let root = settings.project_dir();
    let pattern = format!(
        "{}/{}",
        Pattern::escape(&root.to_string_lossy()),
        settings.spec_pattern()
    );

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        files.push(relative_to(root, &path));
    }
    files.sort();
    Ok(files)
}

fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}
