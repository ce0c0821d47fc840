//! Command line interface for the onefile bundler.
//!
//! Dispatches exactly one mode per run: help, clean or build. Build mode
//! sequences the pre-flight gates, the packaging tool and the result report.

mod args;
mod output;

pub use args::{Args, CLEAN_KEYWORD, Mode};
pub use output::OutputManager;

use crate::bundler::{self, Bundler, PlatformTag, Settings};
use crate::error::{CliError, Result};

const BIN_NAME: &str = "kodegen_bundler_onefile";

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args().map_err(|e| CliError::InvalidArguments {
        reason: e.to_string().trim().to_string(),
    })?;
    let output = OutputManager::stdout();

    if args.mode() != Mode::Help {
        args.validate()
            .map_err(|reason| CliError::InvalidArguments { reason })?;
        check_project_dir(&args).await?;
    }

    Ok(dispatch(&args, PlatformTag::current(), &output).await)
}

/// Runs the selected mode and returns the process exit code.
pub async fn dispatch(args: &Args, platform: PlatformTag, output: &OutputManager) -> i32 {
    match args.mode() {
        Mode::Help => {
            print_help(output);
            0
        }
        Mode::Clean => {
            bundler::clean(&args.settings(platform), output).await;
            0
        }
        Mode::Build => build(args.settings(platform), output).await,
    }
}

async fn build(settings: Settings, output: &OutputManager) -> i32 {
    output.section("Meeting Extractor - Build");
    output.progress(&format!("Target platform: {}", settings.platform()));
    output.blank();

    let bundler = Bundler::new(settings, output.clone());
    if !bundler.preflight().await {
        return 1;
    }
    output.blank();

    let outcome = bundler.build_executable().await;
    if !outcome.success {
        output.blank();
        output.println("Build failed!");
        output.hint(&format!("Run `{BIN_NAME} --debug` to see the detailed build log"));
        return 1;
    }

    bundler.report(outcome).await;
    output.blank();
    output.println("Build complete!");
    output.hint(&format!("To remove build files, run: {BIN_NAME} {CLEAN_KEYWORD}"));
    0
}

async fn check_project_dir(args: &Args) -> Result<()> {
    use crate::bundler::ErrorExt;

    let metadata = tokio::fs::metadata(&args.project_dir)
        .await
        .fs_context("reading project directory", &args.project_dir)?;
    if !metadata.is_dir() {
        return Err(CliError::InvalidArguments {
            reason: format!("{} is not a directory", args.project_dir.display()),
        }
        .into());
    }
    Ok(())
}

fn print_help(output: &OutputManager) {
    output.println(&format!(
        "\
=== Meeting Extractor - Build Script ===

Usage:
  {BIN_NAME}              # build the executable
  {BIN_NAME} clean        # remove build files
  {BIN_NAME} --debug      # show the detailed build log
  {BIN_NAME} --help       # show this help

Options:
  --project-dir <DIR>     project root [env: ONEFILE_PROJECT_DIR] [default: .]
  --packager <PROGRAM>    packaging tool [env: ONEFILE_PACKAGER] [default: pyinstaller]
  --python <PROGRAM>      Python interpreter [env: ONEFILE_PYTHON] [default: python3]

Supported platforms:
  - Windows (exe)
  - macOS (executable)
  - Linux (executable)

Requirements:
  - Python 3.10+
  - PyInstaller
  - Project dependencies installed
"
    ));
}
