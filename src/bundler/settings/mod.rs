//! Build configuration.
//!
//! [`Settings`] is the immutable record every pipeline stage reads from;
//! [`SettingsBuilder`] assembles it from the resolved platform and the
//! command line.

mod builder;
mod core;

pub use builder::{
    DEFAULT_BUNDLE_IDENTIFIER, DEFAULT_DATA_FILE, DEFAULT_ENTRY_POINT, DEFAULT_NAME_TEMPLATE,
    DEFAULT_PACKAGER, DEFAULT_RUNTIME, SettingsBuilder,
};
pub use core::Settings;
