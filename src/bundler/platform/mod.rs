//! Host platform detection.
//!
//! The platform tag is resolved once per run and flows into the artifact
//! name and the platform-conditional packager flags.

use std::fmt;

/// Canonical tag for the host operating system family.
///
/// Unknown families are not rejected: they are carried verbatim as
/// [`PlatformTag::Other`] and produce a generic build with no
/// platform-specific packager flags.
///
/// # Examples
///
/// ```
/// use kodegen_bundler_onefile::bundler::PlatformTag;
///
/// assert_eq!(PlatformTag::resolve("Darwin"), PlatformTag::MacOs);
/// assert_eq!(PlatformTag::resolve("FreeBSD").as_str(), "freebsd");
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum PlatformTag {
    /// Microsoft Windows
    Windows,
    /// Apple macOS
    MacOs,
    /// Linux distributions
    Linux,
    /// Any other family, lower-cased as reported by the host
    Other(String),
}

impl PlatformTag {
    /// Maps an operating system family identifier to its tag.
    ///
    /// Matching is case-insensitive. Both `darwin` (the kernel name) and
    /// `macos` (what `std::env::consts::OS` reports) resolve to
    /// [`PlatformTag::MacOs`].
    pub fn resolve(os_family: &str) -> Self {
        let family = os_family.to_lowercase();
        match family.as_str() {
            "darwin" | "macos" => Self::MacOs,
            "windows" => Self::Windows,
            "linux" => Self::Linux,
            _ => Self::Other(family),
        }
    }

    /// Resolves the tag of the host this process runs on.
    pub fn current() -> Self {
        let tag = Self::resolve(std::env::consts::OS);
        log::debug!("Resolved host platform {} -> {}", std::env::consts::OS, tag);
        tag
    }

    /// Short identifier used in artifact names.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Linux => "linux",
            Self::Other(family) => family,
        }
    }

    /// Whether executables on this platform are launched without a `./` prefix.
    pub fn is_windows(&self) -> bool {
        matches!(self, Self::Windows)
    }
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
