//! Post-build artifact discovery and usage instructions.

use super::BuildOutcome;
use crate::bundler::{Result, Settings, error::ErrorExt};
use crate::cli::OutputManager;
use glob::Pattern;
use std::path::PathBuf;

/// Argument shown in the usage example.
const SAMPLE_INPUT: &str = "meeting_notes.txt";
/// Credential the packaged application reads from `.env`.
const REQUIRED_KEY: &str = "ARK_API_KEY";

/// Finds the produced artifact, prints its location and size, then the
/// usage instructions.
///
/// A missing artifact is reported as a warning only; the outcome's success
/// flag is left untouched.
pub async fn report_result(
    settings: &Settings,
    output: &OutputManager,
    mut outcome: BuildOutcome,
) -> BuildOutcome {
    output.progress("Build result...");

    let artifact = match find_artifact(settings) {
        Ok(Some(path)) => path,
        Ok(None) => {
            log::warn!(
                "No artifact matching {}* in {}",
                settings.output_name(),
                settings.project_path(settings.dist_dir()).display()
            );
            output.warn("Built executable not found");
            return outcome;
        }
        Err(e) => {
            log::warn!("Artifact lookup failed: {e}");
            output.warn(&format!("Built executable not found: {e}"));
            return outcome;
        }
    };

    let size = match tokio::fs::metadata(&artifact)
        .await
        .fs_context("reading artifact metadata", &artifact)
    {
        Ok(metadata) => metadata.len(),
        Err(e) => {
            output.warn(&e.to_string());
            return outcome;
        }
    };

    output.indent(&format!("Executable: {}", artifact.display()));
    output.indent(&format!("Size: {}", format_megabytes(size)));

    let file_name = artifact
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| settings.output_name());
    print_usage(settings, output, &file_name);

    outcome.artifact_path = Some(artifact);
    outcome.artifact_size = Some(size);
    outcome
}

/// Returns the first entry in the dist directory named `<output_name>*`.
fn find_artifact(settings: &Settings) -> Result<Option<PathBuf>> {
    let dist_dir = settings.project_path(settings.dist_dir());
    let pattern = format!(
        "{}/{}*",
        Pattern::escape(&dist_dir.to_string_lossy()),
        Pattern::escape(&settings.output_name())
    );

    let mut matches = glob::glob(&pattern)?.collect::<std::result::Result<Vec<_>, _>>()?;
    matches.sort();
    Ok(matches.into_iter().next())
}

/// Formats a byte count as megabytes with one decimal place.
pub(crate) fn format_megabytes(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
}

fn print_usage(settings: &Settings, output: &OutputManager, file_name: &str) {
    output.blank();
    output.section("Usage");
    output.println("1. Copy the executable to the target machine");
    output.println(&format!("2. Create a .env file that sets {REQUIRED_KEY}"));
    output.println("3. Prepare the meeting notes text file");
    if settings.platform().is_windows() {
        output.println(&format!("4. Run: {file_name} {SAMPLE_INPUT}"));
    } else {
        output.println(&format!("4. Run: ./{file_name} {SAMPLE_INPUT}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{PlatformTag, SettingsBuilder};
    use tempfile::TempDir;

    fn settings_in(dir: &TempDir, platform: PlatformTag) -> Settings {
        SettingsBuilder::new()
            .project_dir(dir.path())
            .platform(platform)
            .build()
    }

    fn succeeded() -> BuildOutcome {
        BuildOutcome {
            success: true,
            exit_code: Some(0),
            ..Default::default()
        }
    }

    #[test]
    fn megabytes_have_one_decimal() {
        assert_eq!(format_megabytes(0), "0.0 MB");
        assert_eq!(format_megabytes(1024 * 1024), "1.0 MB");
        assert_eq!(format_megabytes(15 * 1024 * 1024 + 512 * 1024), "15.5 MB");
    }

    #[tokio::test]
    async fn missing_artifact_is_a_warning() {
        let dir = TempDir::new().unwrap();
        let output = OutputManager::capture();
        let outcome =
            report_result(&settings_in(&dir, PlatformTag::Linux), &output, succeeded()).await;

        assert!(outcome.success);
        assert_eq!(outcome.artifact_path, None);
        assert!(output.captured().contains("⚠ Built executable not found"));
    }

    #[tokio::test]
    async fn reports_size_and_unix_usage() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("dist")).unwrap();
        let artifact = dir.path().join("dist/meeting_extractor_linux");
        std::fs::write(&artifact, vec![0u8; 2 * 1024 * 1024]).unwrap();
        let output = OutputManager::capture();

        let outcome =
            report_result(&settings_in(&dir, PlatformTag::Linux), &output, succeeded()).await;

        assert_eq!(outcome.artifact_path.as_deref(), Some(artifact.as_path()));
        assert_eq!(outcome.artifact_size, Some(2 * 1024 * 1024));
        let text = output.captured();
        assert!(text.contains("Size: 2.0 MB"));
        assert!(text.contains("ARK_API_KEY"));
        assert!(text.contains("4. Run: ./meeting_extractor_linux meeting_notes.txt"));
    }

    #[tokio::test]
    async fn windows_usage_has_no_dot_slash() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("dist")).unwrap();
        std::fs::write(dir.path().join("dist/meeting_extractor_windows.exe"), b"MZ").unwrap();
        let output = OutputManager::capture();

        report_result(&settings_in(&dir, PlatformTag::Windows), &output, succeeded()).await;

        assert!(output
            .captured()
            .contains("4. Run: meeting_extractor_windows.exe meeting_notes.txt"));
    }

    #[tokio::test]
    async fn other_platform_artifacts_are_ignored() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("dist")).unwrap();
        std::fs::write(dir.path().join("dist/meeting_extractor_windows.exe"), b"MZ").unwrap();
        let output = OutputManager::capture();

        let outcome =
            report_result(&settings_in(&dir, PlatformTag::MacOs), &output, succeeded()).await;
        assert_eq!(outcome.artifact_path, None);
    }
}
