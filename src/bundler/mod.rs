//! Single-file executable bundling.
//!
//! Resolves the host platform, builds the immutable [`Settings`], and drives
//! the packaging tool through the [`Bundler`]. [`clean`] removes everything
//! a build leaves behind.

mod builder;
mod clean;
pub mod error;
mod platform;
mod settings;
mod utils;

pub use builder::{BuildOutcome, Bundler, PackagingInvocation, preflight, report};
pub use clean::clean;
pub use error::{Error, ErrorExt, Result};
pub use platform::PlatformTag;
pub use settings::{
    DEFAULT_BUNDLE_IDENTIFIER, DEFAULT_DATA_FILE, DEFAULT_ENTRY_POINT, DEFAULT_NAME_TEMPLATE,
    DEFAULT_PACKAGER, DEFAULT_RUNTIME, Settings, SettingsBuilder,
};
