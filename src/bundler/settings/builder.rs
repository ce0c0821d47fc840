//! Builder for constructing Settings.

use super::Settings;
use crate::bundler::PlatformTag;
use std::path::{Path, PathBuf};

/// Default artifact name prefix.
pub const DEFAULT_NAME_TEMPLATE: &str = "meeting_extractor";
/// Default entry point script.
pub const DEFAULT_ENTRY_POINT: &str = "meeting_extractor.py";
/// Default data file bundled into the executable.
pub const DEFAULT_DATA_FILE: &str = "env_template";
/// Default packaging tool.
pub const DEFAULT_PACKAGER: &str = "pyinstaller";
/// Default host runtime.
pub const DEFAULT_RUNTIME: &str = "python3";
/// Default macOS bundle identifier.
pub const DEFAULT_BUNDLE_IDENTIFIER: &str = "com.meetingextractor.app";

/// Builder for constructing [`Settings`].
///
/// Every field has a default, so `SettingsBuilder::new().build()` yields the
/// standard configuration for the host platform. No validation happens here;
/// the pre-flight checks own that.
///
/// # Examples
///
/// ```
/// use kodegen_bundler_onefile::bundler::{PlatformTag, SettingsBuilder};
///
/// let settings = SettingsBuilder::new()
///     .project_dir("/tmp/app")
///     .platform(PlatformTag::Windows)
///     .packager("pyinstaller")
///     .debug(true)
///     .build();
/// assert_eq!(settings.output_name(), "meeting_extractor_windows");
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    platform: Option<PlatformTag>,
    project_dir: Option<PathBuf>,
    entry_point: Option<PathBuf>,
    packager: Option<String>,
    runtime: Option<String>,
    debug: bool,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the platform tag.
    ///
    /// Default: [`PlatformTag::current`]
    pub fn platform(mut self, platform: PlatformTag) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Sets the project root all relative paths resolve against.
    ///
    /// Default: `.`
    pub fn project_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the entry point script, relative to the project root.
    ///
    /// Default: `meeting_extractor.py`
    pub fn entry_point<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.entry_point = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the packaging tool program.
    ///
    /// Default: `pyinstaller`
    pub fn packager(mut self, program: impl Into<String>) -> Self {
        self.packager = Some(program.into());
        self
    }

    /// Sets the host runtime program used for the version gate.
    ///
    /// Default: `python3`
    pub fn runtime(mut self, program: impl Into<String>) -> Self {
        self.runtime = Some(program.into());
        self
    }

    /// Echo packaging tool output to the console.
    ///
    /// Default: false
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Builds the settings.
    pub fn build(self) -> Settings {
        Settings::new(
            self.platform.unwrap_or_else(PlatformTag::current),
            DEFAULT_NAME_TEMPLATE.to_string(),
            self.entry_point
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ENTRY_POINT)),
            PathBuf::from(DEFAULT_DATA_FILE),
            PathBuf::from("build"),
            PathBuf::from("dist"),
            PathBuf::from("__pycache__"),
            "*.spec".to_string(),
            self.project_dir.unwrap_or_else(|| PathBuf::from(".")),
            self.packager
                .unwrap_or_else(|| DEFAULT_PACKAGER.to_string()),
            self.runtime.unwrap_or_else(|| DEFAULT_RUNTIME.to_string()),
            DEFAULT_BUNDLE_IDENTIFIER.to_string(),
            self.debug,
        )
    }
}
