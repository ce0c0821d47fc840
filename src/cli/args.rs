//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap. Modes are selected
//! by scanning for flags and keywords rather than by position, so
//! `clean --debug` and `--debug clean` mean the same thing. Unrecognized
//! flags are dropped before clap sees them, and a help flag anywhere on the
//! command line wins over everything else.

use crate::bundler::{DEFAULT_PACKAGER, DEFAULT_RUNTIME, PlatformTag, Settings, SettingsBuilder};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Keyword selecting clean mode.
pub const CLEAN_KEYWORD: &str = "clean";

const HELP_FLAGS: &[&str] = &["--help", "-h"];
const KNOWN_FLAGS: &[&str] = &["--debug", "--version", "-V"];
const KNOWN_OPTIONS: &[&str] = &["--project-dir", "--packager", "--python"];

/// Single-file executable builder
#[derive(Parser, Debug, Clone)]
#[command(
    name = "kodegen_bundler_onefile",
    version,
    about = "Builds a single-file executable of the meeting extractor",
    disable_help_flag = true
)]
pub struct Args {
    /// Print usage and exit
    #[arg(short = 'h', long = "help")]
    pub help: bool,

    /// Stream packaging tool output to the console
    #[arg(long)]
    pub debug: bool,

    /// Project root containing the entry point
    #[arg(long, value_name = "DIR", env = "ONEFILE_PROJECT_DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Packaging tool program
    #[arg(long, value_name = "PROGRAM", env = "ONEFILE_PACKAGER", default_value = DEFAULT_PACKAGER)]
    pub packager: String,

    /// Python interpreter checked by the pre-flight gate
    #[arg(long, value_name = "PROGRAM", env = "ONEFILE_PYTHON", default_value = DEFAULT_RUNTIME)]
    pub python: String,

    /// Bare keywords; `clean` removes build files, anything else builds
    #[arg(value_name = "COMMAND")]
    pub commands: Vec<String>,
}

/// Mutually exclusive run modes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// Print usage text
    Help,
    /// Remove build files
    Clean,
    /// Build the executable
    Build,
}

impl Args {
    /// Parse command line arguments
    ///
    /// `--version` prints and exits here; any other clap error is returned
    /// so the caller can exit with status 1.
    pub fn parse_args() -> Result<Self, clap::Error> {
        Self::from_argv(std::env::args_os()).map_err(|e| match e.kind() {
            clap::error::ErrorKind::DisplayVersion => e.exit(),
            _ => e,
        })
    }

    /// Parses an argument vector (program name first).
    ///
    /// A help flag short-circuits parsing, so `--help --packager` still
    /// prints help. Otherwise unrecognized `-`/`--` flags are ignored.
    pub fn from_argv<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let program = argv.next().unwrap_or_else(|| OsString::from("kodegen_bundler_onefile"));
        let rest: Vec<OsString> = argv.collect();

        if rest.iter().any(|arg| is_one_of(arg, HELP_FLAGS)) {
            return Self::try_parse_from([program, OsString::from("--help")]);
        }

        Self::try_parse_from(std::iter::once(program).chain(recognized(rest)))
    }

    /// Selects the mode: help wins over clean, clean over build.
    pub fn mode(&self) -> Mode {
        if self.help {
            Mode::Help
        } else if self.commands.iter().any(|word| word == CLEAN_KEYWORD) {
            Mode::Clean
        } else {
            Mode::Build
        }
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.packager.trim().is_empty() {
            return Err("Packager cannot be empty".to_string());
        }
        if self.python.trim().is_empty() {
            return Err("Python interpreter cannot be empty".to_string());
        }
        Ok(())
    }

    /// Build settings for the given platform.
    pub fn settings(&self, platform: PlatformTag) -> Settings {
        SettingsBuilder::new()
            .platform(platform)
            .project_dir(&self.project_dir)
            .packager(&self.packager)
            .runtime(&self.python)
            .debug(self.debug)
            .build()
    }
}

fn is_one_of(arg: &OsString, names: &[&str]) -> bool {
    arg.to_str().is_some_and(|arg| names.contains(&arg))
}

/// Keeps known flags, known options with their values, and bare words.
fn recognized(args: Vec<OsString>) -> Vec<OsString> {
    let mut kept = Vec::with_capacity(args.len());
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let Some(text) = arg.to_str() else {
            kept.push(arg);
            continue;
        };
        if text == "--" {
            kept.push(arg);
            kept.extend(args.by_ref());
            break;
        }
        if !text.starts_with('-') || text == "-" || KNOWN_FLAGS.contains(&text) {
            kept.push(arg);
            continue;
        }

        let name = text.split_once('=').map_or(text, |(name, _)| name);
        if KNOWN_OPTIONS.contains(&name) {
            let inline_value = name.len() != text.len();
            kept.push(arg);
            if !inline_value {
                kept.extend(args.next());
            }
        } else {
            log::debug!("Ignoring unrecognized argument: {text}");
        }
    }
    kept
}
