//! File system utilities for cleaning.
//!
//! Removal helpers are idempotent: a path that is already gone is not an
//! error, it is reported as "nothing removed".

use crate::bundler::error::{ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// What a removal call actually deleted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Removed {
    /// A directory tree
    Directory,
    /// A single file or symlink
    File,
    /// Nothing existed at the path
    Nothing,
}

/// Removes whatever exists at `path`: directories recursively, files and
/// symlinks directly. Symlinks to directories are unlinked, not followed.
pub async fn remove_path(path: &Path) -> Result<Removed> {
    let metadata = match fs::symlink_metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Removed::Nothing),
        Err(e) => return Err(e).fs_context("reading metadata", path),
    };

    if metadata.is_dir() {
        remove_dir_all(path).await
    } else {
        remove_file(path).await
    }
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<Removed> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(Removed::Directory),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Removed::Nothing),
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Removes the file if it exists.
pub async fn remove_file(path: &Path) -> Result<Removed> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(Removed::File),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Removed::Nothing),
        Err(e) => Err(e).fs_context("removing file", path),
    }
}
