//! Pre-flight checks run before the packaging tool is spawned.
//!
//! Two gates block a build: the toolchain gate ([`check_dependencies`]) and
//! the source gate ([`check_source_files`]). Both report to the operator and
//! return `false` on failure; the caller aborts with exit code 1.

use crate::bundler::{Error, Result, Settings};
use crate::cli::OutputManager;
use semver::{Version, VersionReq};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// Host runtime versions accepted by the packaging tool.
const RUNTIME_REQUIREMENT: &str = ">=3.10.0, <4.0.0";

/// Verifies the packaging tool and the host runtime.
///
/// The packaging tool must be on `PATH` and answer `--version`. The host
/// runtime must report a 3.x version with minor >= 10; anything lower is a
/// hard failure.
pub async fn check_dependencies(settings: &Settings, output: &OutputManager) -> bool {
    output.progress("Checking build dependencies...");

    match packager_version(settings).await {
        Ok(version) => output.success(&format!("{}: {}", settings.packager(), version)),
        Err(e) => {
            report_failure(output, &e);
            return false;
        }
    }

    match runtime_version(settings).await {
        Ok(version) => {
            output.success(&format!("Python: {version}"));
            true
        }
        Err(e) => {
            report_failure(output, &e);
            false
        }
    }
}

/// Verifies the build inputs exist.
///
/// A missing entry point fails the check. A missing data file only warns:
/// it is runtime configuration for the packaged application, not a build
/// input.
pub fn check_source_files(settings: &Settings, output: &OutputManager) -> bool {
    output.progress("Checking source files...");

    let entry_point = settings.project_path(settings.entry_point());
    if !entry_point.is_file() {
        log::debug!("Entry point not found at {}", entry_point.display());
        output.error(&format!(
            "Source file not found: {}",
            settings.entry_point().display()
        ));
        return false;
    }
    output.success(&format!("Source file: {}", settings.entry_point().display()));

    let data_file = settings.project_path(settings.data_file());
    if data_file.exists() {
        output.success(&format!(
            "Environment template: {}",
            settings.data_file().display()
        ));
    } else {
        output.warn(&format!(
            "Environment template not found: {}",
            settings.data_file().display()
        ));
        output.hint(&format!(
            "Consider creating a {} file",
            settings.data_file().display()
        ));
    }

    true
}

fn report_failure(output: &OutputManager, error: &Error) {
    match error {
        Error::Preflight { reason, hint } => {
            output.error(reason);
            output.hint(hint);
        }
        other => output.error(&other.to_string()),
    }
}

/// Locates the packaging tool and returns its trimmed `--version` output.
async fn packager_version(settings: &Settings) -> Result<String> {
    let packager = settings.packager();
    let missing = |detail: String| Error::Preflight {
        reason: format!("{packager} is not installed ({detail})"),
        hint: format!("Install it with: uv add {packager}"),
    };

    let path = locate_packager(settings).map_err(|e| missing(e.to_string()))?;
    log::debug!("Found {} at: {}", packager, path.display());

    let stdout = version_query(path).await.map_err(|e| missing(e.to_string()))?;
    Ok(stdout.trim().to_string())
}

/// Resolves the packaging tool to an absolute path.
///
/// Relative programs such as `./venv/bin/pyinstaller` resolve against the
/// working directory of this process, not the project root, so the path
/// checked here is the path the build spawns.
pub(crate) fn locate_packager(settings: &Settings) -> Result<PathBuf> {
    let packager = settings.packager();
    let path = which::which(packager).map_err(|e| Error::CommandFailed {
        command: packager.to_string(),
        error: std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()),
    })?;
    Ok(std::path::absolute(&path).unwrap_or(path))
}

/// Queries the host runtime version and enforces [`RUNTIME_REQUIREMENT`].
async fn runtime_version(settings: &Settings) -> Result<Version> {
    let runtime = settings.runtime();
    let hint = "Python 3.10+ is required".to_string();

    let path = which::which(runtime).map_err(|e| Error::Preflight {
        reason: format!("{runtime} not found: {e}"),
        hint: hint.clone(),
    })?;

    let reported = version_query(path).await.map_err(|e| Error::Preflight {
        reason: format!("{runtime} --version failed: {e}"),
        hint: hint.clone(),
    })?;

    let version = parse_runtime_version(&reported).map_err(|e| Error::Preflight {
        reason: format!("Unrecognized Python version `{}`: {}", reported.trim(), e),
        hint: hint.clone(),
    })?;

    let requirement = VersionReq::parse(RUNTIME_REQUIREMENT)?;
    if !requirement.matches(&version) {
        return Err(Error::Preflight {
            reason: format!("Python version too old: {}.{}", version.major, version.minor),
            hint,
        });
    }

    Ok(version)
}

/// Runs `<program> --version`, returning stdout or, if empty, stderr.
async fn version_query(program: PathBuf) -> Result<String> {
    let command = program.display().to_string();
    let result = Command::new(&program)
        .arg("--version")
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|error| Error::CommandFailed {
            command: command.clone(),
            error,
        })?;

    if !result.status.success() {
        log::warn!(
            "{} --version exited with {:?}. Stderr: {}",
            command,
            result.status.code(),
            String::from_utf8_lossy(&result.stderr)
        );
        return Err(Error::InvocationFailed {
            command,
            exit_code: result.status.code(),
        });
    }

    let stdout = String::from_utf8_lossy(&result.stdout);
    if stdout.trim().is_empty() {
        Ok(String::from_utf8_lossy(&result.stderr).into_owned())
    } else {
        Ok(stdout.into_owned())
    }
}

/// Parses output such as `Python 3.11.4` or `3.13.0rc1` into a version.
///
/// Missing components are zero-filled and pre-release suffixes dropped, so
/// `3.12` and `3.12.0rc1` both parse as `3.12.0`.
pub(crate) fn parse_runtime_version(reported: &str) -> Result<Version> {
    let token = reported
        .split_whitespace()
        .find(|word| word.starts_with(|c: char| c.is_ascii_digit()))
        .ok_or_else(|| Error::GenericError("no version number in output".into()))?;

    let mut parts = token
        .split('.')
        .map(|part| {
            part.chars()
                .take_while(char::is_ascii_digit)
                .collect::<String>()
        })
        .take(3)
        .collect::<Vec<_>>();
    if let Some(end) = parts.iter().position(String::is_empty) {
        parts.truncate(end);
    }
    if parts.is_empty() {
        crate::bail!("`{}` is not a version", token);
    }
    parts.resize(3, "0".to_string());

    Ok(Version::parse(&parts.join("."))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{PlatformTag, SettingsBuilder};
    use tempfile::TempDir;

    #[test]
    fn parses_runtime_versions() {
        assert_eq!(
            parse_runtime_version("Python 3.11.4\n").unwrap(),
            Version::new(3, 11, 4)
        );
        assert_eq!(parse_runtime_version("Python 3.12").unwrap(), Version::new(3, 12, 0));
        assert_eq!(
            parse_runtime_version("Python 3.13.0rc1").unwrap(),
            Version::new(3, 13, 0)
        );
        assert!(parse_runtime_version("Python").is_err());
    }

    #[test]
    fn requirement_gates_minor_version() {
        let requirement = VersionReq::parse(RUNTIME_REQUIREMENT).unwrap();
        assert!(requirement.matches(&Version::new(3, 10, 0)));
        assert!(requirement.matches(&Version::new(3, 13, 1)));
        assert!(!requirement.matches(&Version::new(3, 9, 18)));
        assert!(!requirement.matches(&Version::new(2, 7, 18)));
        assert!(!requirement.matches(&Version::new(4, 0, 0)));
    }

    fn settings_in(dir: &TempDir) -> Settings {
        SettingsBuilder::new()
            .project_dir(dir.path())
            .platform(PlatformTag::MacOs)
            .build()
    }

    #[test]
    fn missing_entry_point_fails() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("env_template"), "ARK_API_KEY=").unwrap();
        let output = OutputManager::capture();

        assert!(!check_source_files(&settings_in(&dir), &output));
        assert!(output.captured().contains("Source file not found: meeting_extractor.py"));
    }

    #[test]
    fn missing_template_only_warns() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("meeting_extractor.py"), "print('hi')").unwrap();
        let output = OutputManager::capture();

        assert!(check_source_files(&settings_in(&dir), &output));
        let text = output.captured();
        assert!(text.contains("⚠ Environment template not found: env_template"));
        assert!(text.contains("✓ Source file: meeting_extractor.py"));
    }

    #[test]
    fn present_template_is_reported() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("meeting_extractor.py"), "").unwrap();
        std::fs::write(dir.path().join("env_template"), "").unwrap();
        let output = OutputManager::capture();

        assert!(check_source_files(&settings_in(&dir), &output));
        assert!(output.captured().contains("✓ Environment template: env_template"));
    }

    #[tokio::test]
    async fn missing_packager_fails_with_hint() {
        let dir = TempDir::new().unwrap();
        let settings = SettingsBuilder::new()
            .project_dir(dir.path())
            .packager("definitely-not-a-real-packager-7f3a")
            .build();
        let output = OutputManager::capture();

        assert!(!check_dependencies(&settings, &output).await);
        let text = output.captured();
        assert!(text.contains("definitely-not-a-real-packager-7f3a is not installed"));
        assert!(text.contains("uv add definitely-not-a-real-packager-7f3a"));
    }

    #[cfg(unix)]
    mod fake_tools {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use std::path::Path;

        fn script(dir: &Path, name: &str, body: &str) -> String {
            let path = dir.join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path.display().to_string()
        }

        #[tokio::test]
        async fn accepts_supported_toolchain() {
            let dir = TempDir::new().unwrap();
            let settings = SettingsBuilder::new()
                .project_dir(dir.path())
                .packager(script(dir.path(), "packager", "echo 6.3.0"))
                .runtime(script(dir.path(), "python", "echo Python 3.11.4"))
                .build();
            let output = OutputManager::capture();

            assert!(check_dependencies(&settings, &output).await);
            let text = output.captured();
            assert!(text.contains(": 6.3.0"));
            assert!(text.contains("✓ Python: 3.11.4"));
        }

        #[tokio::test]
        async fn rejects_old_runtime() {
            let dir = TempDir::new().unwrap();
            let settings = SettingsBuilder::new()
                .project_dir(dir.path())
                .packager(script(dir.path(), "packager", "echo 6.3.0"))
                .runtime(script(dir.path(), "python", "echo Python 3.9.18"))
                .build();
            let output = OutputManager::capture();

            assert!(!check_dependencies(&settings, &output).await);
            let text = output.captured();
            assert!(text.contains("Python version too old: 3.9"));
            assert!(text.contains("Python 3.10+ is required"));
        }

        #[test]
        fn packager_resolves_to_absolute_path() {
            let dir = TempDir::new().unwrap();
            let settings = SettingsBuilder::new()
                .project_dir(dir.path())
                .packager(script(dir.path(), "packager", "echo 6.3.0"))
                .build();

            let path = locate_packager(&settings).unwrap();
            assert!(path.is_absolute());
            assert_eq!(path, dir.path().join("packager"));
        }

        #[tokio::test]
        async fn rejects_failing_packager() {
            let dir = TempDir::new().unwrap();
            let settings = SettingsBuilder::new()
                .project_dir(dir.path())
                .packager(script(dir.path(), "packager", "exit 3"))
                .runtime(script(dir.path(), "python", "echo Python 3.11.4"))
                .build();
            let output = OutputManager::capture();

            assert!(!check_dependencies(&settings, &output).await);
            assert!(output.captured().contains("is not installed"));
        }
    }
}
