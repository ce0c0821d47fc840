//! Core Settings struct and implementations.

use crate::bundler::PlatformTag;
use std::path::{Path, PathBuf};

/// Immutable build configuration.
///
/// Constructed once per run via [`SettingsBuilder`](super::SettingsBuilder)
/// and read-only afterwards. Every relative path is resolved against
/// [`Settings::project_dir`], never against the process working directory.
///
/// # Examples
///
/// ```
/// use kodegen_bundler_onefile::bundler::{PlatformTag, SettingsBuilder};
///
/// let settings = SettingsBuilder::new()
///     .platform(PlatformTag::MacOs)
///     .build();
/// assert_eq!(settings.output_name(), "meeting_extractor_macos");
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Resolved host platform.
    platform: PlatformTag,

    /// Artifact name prefix, suffixed with the platform tag.
    name_template: String,

    /// Script handed to the packaging tool.
    entry_point: PathBuf,

    /// Optional data file bundled next to the entry point.
    data_file: PathBuf,

    /// Packaging tool working directory.
    build_dir: PathBuf,

    /// Packaging tool output directory.
    dist_dir: PathBuf,

    /// Bytecode cache left behind by the host runtime.
    cache_dir: PathBuf,

    /// Glob for spec files the packaging tool generates.
    spec_pattern: String,

    /// Root every relative path is resolved against.
    project_dir: PathBuf,

    /// Packaging tool program.
    packager: String,

    /// Host runtime program used for the version gate.
    runtime: String,

    /// Bundle identifier passed on macOS.
    bundle_identifier: String,

    /// Echo packaging tool output to the console.
    debug: bool,
}

impl Settings {
    /// Returns the resolved platform tag.
    pub fn platform(&self) -> &PlatformTag {
        &self.platform
    }

    /// Returns the artifact name, e.g. `meeting_extractor_linux`.
    pub fn output_name(&self) -> String {
        format!("{}_{}", self.name_template, self.platform)
    }

    /// Returns the entry point relative to the project root.
    pub fn entry_point(&self) -> &Path {
        &self.entry_point
    }

    /// Returns the data file relative to the project root.
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Returns the build working directory relative to the project root.
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Returns the distribution directory relative to the project root.
    pub fn dist_dir(&self) -> &Path {
        &self.dist_dir
    }

    /// Returns the cache directory relative to the project root.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the generated spec-file glob.
    pub fn spec_pattern(&self) -> &str {
        &self.spec_pattern
    }

    /// Returns the project root.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Resolves a path against the project root.
    pub fn project_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.project_dir.join(relative)
    }

    /// Returns the packaging tool program.
    pub fn packager(&self) -> &str {
        &self.packager
    }

    /// Returns the host runtime program.
    pub fn runtime(&self) -> &str {
        &self.runtime
    }

    /// Returns the macOS bundle identifier.
    pub fn bundle_identifier(&self) -> &str {
        &self.bundle_identifier
    }

    /// Whether packaging tool output is echoed.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        platform: PlatformTag,
        name_template: String,
        entry_point: PathBuf,
        data_file: PathBuf,
        build_dir: PathBuf,
        dist_dir: PathBuf,
        cache_dir: PathBuf,
        spec_pattern: String,
        project_dir: PathBuf,
        packager: String,
        runtime: String,
        bundle_identifier: String,
        debug: bool,
    ) -> Self {
        Self {
            platform,
            name_template,
            entry_point,
            data_file,
            build_dir,
            dist_dir,
            cache_dir,
            spec_pattern,
            project_dir,
            packager,
            runtime,
            bundle_identifier,
            debug,
        }
    }
}
