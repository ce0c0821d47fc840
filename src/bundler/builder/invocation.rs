//! Packaging tool command line construction.
//!
//! The argument list is a pure function of [`Settings`]: base flags, then the
//! entry point, then the platform flags from a static table.

use crate::bundler::{PlatformTag, Settings};
use std::fmt;

/// Bytecode optimization level requested from the packaging tool.
const OPTIMIZE_LEVEL: &str = "2";

/// A fully assembled packaging tool invocation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PackagingInvocation {
    program: String,
    args: Vec<String>,
}

impl PackagingInvocation {
    /// Builds the invocation for the given settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use kodegen_bundler_onefile::bundler::{PackagingInvocation, PlatformTag, SettingsBuilder};
    ///
    /// let settings = SettingsBuilder::new().platform(PlatformTag::Linux).build();
    /// let invocation = PackagingInvocation::from_settings(&settings);
    /// assert_eq!(invocation.program(), "pyinstaller");
    /// assert_eq!(invocation.args().last().unwrap(), "meeting_extractor.py");
    /// ```
    pub fn from_settings(settings: &Settings) -> Self {
        let mut args = vec![
            "--onefile".to_string(),
            "--name".to_string(),
            settings.output_name(),
            "--clean".to_string(),
            "--noconfirm".to_string(),
            "--console".to_string(),
            "--optimize".to_string(),
            OPTIMIZE_LEVEL.to_string(),
            "--add-data".to_string(),
            format!("{}:.", settings.data_file().display()),
            settings.entry_point().display().to_string(),
        ];
        args.extend(platform_flags(settings));

        Self {
            program: settings.packager().to_string(),
            args,
        }
    }

    /// Program to spawn.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments in submission order.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for PackagingInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Platform-conditional flags. Unrecognized platforms get none.
fn platform_flags(settings: &Settings) -> Vec<String> {
    match settings.platform() {
        PlatformTag::Windows => vec![
            "--icon".to_string(),
            "NONE".to_string(),
            "--version-file".to_string(),
            "NONE".to_string(),
        ],
        PlatformTag::MacOs => vec![
            "--osx-bundle-identifier".to_string(),
            settings.bundle_identifier().to_string(),
        ],
        PlatformTag::Linux | PlatformTag::Other(_) => Vec::new(),
    }
}
