//! Main build orchestration.
//!
//! This module provides the [`Bundler`] that runs the pre-flight gates,
//! drives the packaging tool and collects the [`BuildOutcome`].

use super::{PackagingInvocation, preflight, report};
use crate::bundler::{Error, Result, Settings};
use crate::cli::OutputManager;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Result of one build attempt.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BuildOutcome {
    /// Whether the packaging tool exited successfully.
    pub success: bool,
    /// Exit code; absent if the tool never started or died from a signal.
    pub exit_code: Option<i32>,
    /// Artifact found after the build.
    pub artifact_path: Option<PathBuf>,
    /// Size of that artifact in bytes.
    pub artifact_size: Option<u64>,
}

impl BuildOutcome {
    fn from_status(status: ExitStatus) -> Self {
        Self {
            success: status.success(),
            exit_code: status.code(),
            ..Default::default()
        }
    }

    fn spawn_failed() -> Self {
        Self::default()
    }
}

/// Build orchestrator.
///
/// Owns the immutable [`Settings`] and the console sink every stage reports
/// through.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_onefile::bundler::{Bundler, SettingsBuilder};
/// use kodegen_bundler_onefile::cli::OutputManager;
///
/// # async fn example() {
/// let bundler = Bundler::new(SettingsBuilder::new().build(), OutputManager::stdout());
/// if bundler.preflight().await {
///     let outcome = bundler.build_executable().await;
///     if outcome.success {
///         bundler.report(outcome).await;
///     }
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler {
    settings: Settings,
    output: OutputManager,
}

impl Bundler {
    /// Creates a new bundler.
    pub fn new(settings: Settings, output: OutputManager) -> Self {
        Self { settings, output }
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs the dependency gate, then the source gate.
    ///
    /// Stops at the first failing gate.
    pub async fn preflight(&self) -> bool {
        if !preflight::check_dependencies(&self.settings, &self.output).await {
            return false;
        }
        preflight::check_source_files(&self.settings, &self.output)
    }

    /// Runs the packaging tool to completion.
    ///
    /// Failures are reported to the console and folded into the returned
    /// outcome; nothing propagates past this call.
    pub async fn build_executable(&self) -> BuildOutcome {
        self.output.progress(&format!(
            "Building executable ({})...",
            self.settings.platform()
        ));
        self.output
            .indent(&format!("Output name: {}", self.settings.output_name()));

        let invocation = PackagingInvocation::from_settings(&self.settings);
        self.output.indent(&format!("Command: {invocation}"));

        match self.run_packager(&invocation).await {
            Ok(status) if status.success() => {
                self.output.success("Build succeeded");
                BuildOutcome::from_status(status)
            }
            Ok(status) => {
                let failure = Error::InvocationFailed {
                    command: invocation.program().to_string(),
                    exit_code: status.code(),
                };
                log::warn!("{failure}");
                match status.code() {
                    Some(code) => self.output.error(&format!("Build failed: exit code {code}")),
                    None => self.output.error("Build failed: terminated by signal"),
                }
                BuildOutcome::from_status(status)
            }
            Err(e) => {
                log::warn!("{e}");
                self.output.error(&format!("Build error: {e}"));
                BuildOutcome::spawn_failed()
            }
        }
    }

    /// Locates the artifact and prints usage instructions.
    pub async fn report(&self, outcome: BuildOutcome) -> BuildOutcome {
        report::report_result(&self.settings, &self.output, outcome).await
    }

    /// Spawns the packaging tool and drains both output streams.
    async fn run_packager(&self, invocation: &PackagingInvocation) -> Result<ExitStatus> {
        let program = preflight::locate_packager(&self.settings)?;
        log::debug!("Spawning {} in {}", program.display(), self.settings.project_dir().display());

        let mut child = Command::new(&program)
            .args(invocation.args())
            .current_dir(self.settings.project_dir())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|error| Error::CommandFailed {
                command: invocation.program().to_string(),
                error,
            })?;

        // Both pipes must drain before waiting, or a chatty child blocks on a full pipe.
        // The pipes stay owned by the child until it has been reaped.
        let echo = self.settings.debug();
        tokio::join!(
            forward_lines(child.stdout.as_mut(), echo, &self.output),
            forward_lines(child.stderr.as_mut(), echo, &self.output),
        );

        child.wait().await.map_err(|error| Error::CommandFailed {
            command: invocation.program().to_string(),
            error,
        })
    }
}

/// Forwards a child stream line by line, echoing only when requested.
///
/// Lines are decoded lossily: packaging tools print in the console code
/// page, which is not always UTF-8.
async fn forward_lines<R>(stream: Option<R>, echo: bool, output: &OutputManager)
where
    R: AsyncRead + Unpin,
{
    let Some(stream) = stream else {
        return;
    };
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                log::debug!("packager: {}", line.trim_end());
                if echo {
                    output.indent(line.trim());
                }
            }
            Err(e) => {
                log::warn!("Failed to read packager output: {e}");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{PlatformTag, SettingsBuilder};
    use tempfile::TempDir;

    #[tokio::test]
    async fn spawn_failure_is_reported_not_raised() {
        let dir = TempDir::new().unwrap();
        let settings = SettingsBuilder::new()
            .project_dir(dir.path())
            .platform(PlatformTag::Linux)
            .packager("definitely-not-a-real-packager-7f3a")
            .build();
        let output = OutputManager::capture();
        let outcome = Bundler::new(settings, output.clone()).build_executable().await;

        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, None);
        assert!(output.captured().contains("Build error:"));
    }

    #[cfg(unix)]
    mod fake_packager {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        fn bundler_with(dir: &TempDir, platform: PlatformTag, body: &str, debug: bool) -> (Bundler, OutputManager) {
            let path = dir.path().join("fake-packager");
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

            let settings = SettingsBuilder::new()
                .project_dir(dir.path())
                .platform(platform)
                .packager(path.display().to_string())
                .debug(debug)
                .build();
            let output = OutputManager::capture();
            (Bundler::new(settings, output.clone()), output)
        }

        #[tokio::test]
        async fn nonzero_exit_reports_exact_code() {
            let dir = TempDir::new().unwrap();
            for code in [1, 2, 42] {
                let (bundler, output) =
                    bundler_with(&dir, PlatformTag::Windows, &format!("exit {code}"), false);
                let outcome = bundler.build_executable().await;

                assert!(!outcome.success);
                assert_eq!(outcome.exit_code, Some(code));
                assert!(output
                    .captured()
                    .contains(&format!("Build failed: exit code {code}")));
            }
        }

        #[tokio::test]
        async fn output_is_silent_without_debug() {
            let dir = TempDir::new().unwrap();
            let (bundler, output) = bundler_with(
                &dir,
                PlatformTag::Linux,
                "echo building-stdout\necho building-stderr >&2",
                false,
            );
            let outcome = bundler.build_executable().await;

            assert!(outcome.success);
            assert_eq!(outcome.exit_code, Some(0));
            let text = output.captured();
            assert!(!text.contains("building-stdout"));
            assert!(!text.contains("building-stderr"));
            assert!(text.contains("✓ Build succeeded"));
        }

        #[tokio::test]
        async fn debug_echoes_both_streams() {
            let dir = TempDir::new().unwrap();
            let (bundler, output) = bundler_with(
                &dir,
                PlatformTag::Linux,
                "echo building-stdout\necho building-stderr >&2",
                true,
            );
            bundler.build_executable().await;

            let text = output.captured();
            assert!(text.contains("   building-stdout\n"));
            assert!(text.contains("   building-stderr\n"));
        }

        #[tokio::test]
        async fn child_receives_assembled_arguments() {
            let dir = TempDir::new().unwrap();
            let (bundler, _) = bundler_with(
                &dir,
                PlatformTag::MacOs,
                "printf '%s\\n' \"$@\" > args.txt",
                false,
            );
            assert!(bundler.build_executable().await.success);

            let recorded = std::fs::read_to_string(dir.path().join("args.txt")).unwrap();
            let recorded: Vec<&str> = recorded.lines().collect();
            let expected = PackagingInvocation::from_settings(bundler.settings());
            assert_eq!(recorded, expected.args().iter().map(String::as_str).collect::<Vec<_>>());
        }

        #[tokio::test]
        async fn non_utf8_output_keeps_draining() {
            let dir = TempDir::new().unwrap();
            let body = "printf '\\377\\376 gbk\\n'\n\
                        i=0\nwhile [ $i -lt 20000 ]; do echo line-$i; i=$((i+1)); done\n\
                        exit 0";
            for debug in [false, true] {
                let (bundler, output) = bundler_with(&dir, PlatformTag::Windows, body, debug);
                let outcome = bundler.build_executable().await;

                assert!(outcome.success);
                assert_eq!(outcome.exit_code, Some(0));
                let text = output.captured();
                assert!(text.contains("✓ Build succeeded"));
                assert_eq!(text.contains("\u{FFFD}\u{FFFD} gbk"), debug);
                assert_eq!(text.contains("line-19999"), debug);
            }
        }

        #[tokio::test]
        async fn packager_runs_in_project_dir() {
            let dir = TempDir::new().unwrap();
            let (bundler, _) = bundler_with(&dir, PlatformTag::Linux, "pwd > cwd.txt", false);
            let resolved = preflight::locate_packager(bundler.settings()).unwrap();
            assert!(resolved.is_absolute());

            assert!(bundler.build_executable().await.success);
            let cwd = std::fs::read_to_string(dir.path().join("cwd.txt")).unwrap();
            assert_eq!(
                std::fs::canonicalize(cwd.trim()).unwrap(),
                std::fs::canonicalize(dir.path()).unwrap()
            );
        }

        #[tokio::test]
        async fn large_output_does_not_deadlock() {
            let dir = TempDir::new().unwrap();
            let (bundler, _) = bundler_with(
                &dir,
                PlatformTag::Linux,
                "i=0\nwhile [ $i -lt 5000 ]; do echo line-$i; echo err-$i >&2; i=$((i+1)); done",
                false,
            );
            assert!(bundler.build_executable().await.success);
        }
    }
}
