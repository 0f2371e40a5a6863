// ============================================================================
// tracksmith-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg and the tag-reading library
//
// This module wraps every collaborator the pipeline does not implement
// itself behind a trait, so tests can substitute in-memory doubles:
//
// - FfmpegSpawner / FfmpegProcess: running the audio transcoder
// - TagReader: reading container tags from audio files
// - check_dependency / check_encoder: environment preflight
//
// The default implementations use ffmpeg-sidecar and lofty.

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};

// ---- Standard library imports ----
use std::io;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Traits and implementations for executing ffmpeg commands
pub mod ffmpeg_executor;

/// Tag reading abstraction and the lofty-backed reader
pub mod tags;

/// In-memory stand-ins for the external collaborators, used by the test suites
#[cfg(unix)]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner};
pub use tags::{LoftyTagReader, RawTags, TagReader};

/// Name of the transcoder binary looked up on `PATH`.
pub const FFMPEG_BINARY: &str = "ffmpeg";

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks if a required external command is available and executable.
///
/// Runs the command with `-version` and discards its output.
///
/// # Returns
///
/// * `Ok(())` - If the command could be started
/// * `Err(CoreError::DependencyNotFound)` - If the command is not on `PATH`
/// * `Err(CoreError::CommandStart)` - If the command exists but fails to start
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd_name);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", cmd_name);
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{}': {}", cmd_name, e);
            Err(command_start_error(cmd_name, e))
        }
    }
}

/// Verifies that `ffmpeg_cmd` was built with `encoder`.
///
/// Lists the encoders with `-hide_banner -encoders` and searches the
/// encoder column for an exact match.
pub fn check_encoder(ffmpeg_cmd: &str, encoder: &str) -> CoreResult<()> {
    let output = Command::new(ffmpeg_cmd)
        .args(["-hide_banner", "-encoders"])
        .stdin(Stdio::null())
        .output()
        .map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                CoreError::DependencyNotFound(ffmpeg_cmd.to_string())
            } else {
                command_start_error(ffmpeg_cmd, e)
            }
        })?;

    if !output.status.success() {
        return Err(command_failed_error(
            format!("{ffmpeg_cmd} -encoders"),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    let listing = String::from_utf8_lossy(&output.stdout);
    if encoder_listed(&listing, encoder) {
        log::debug!("Encoder '{}' is available", encoder);
        Ok(())
    } else {
        log::error!("Encoder '{}' not found in {} -encoders output", encoder, ffmpeg_cmd);
        Err(CoreError::EncoderUnavailable {
            encoder: encoder.to_string(),
        })
    }
}

/// Returns true when `encoder` appears in the name column of an
/// `ffmpeg -encoders` listing (` A....D libfdk_aac   Fraunhofer FDK AAC`).
pub fn encoder_listed(listing: &str, encoder: &str) -> bool {
    listing.lines().any(|line| {
        let mut fields = line.split_whitespace();
        matches!((fields.next(), fields.next()), (Some(_flags), Some(name)) if name == encoder)
    })
}

/// Preflight for the transcode operation: ffmpeg is present and carries the
/// configured encoder.
pub fn check_transcoder(ffmpeg_cmd: &str, encoder: &str) -> CoreResult<()> {
    check_dependency(ffmpeg_cmd)?;
    check_encoder(ffmpeg_cmd, encoder)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
Encoders:
 V..... = Video
 A..... = Audio
 ------
 V....D libwebp              libwebp WebP image (codec webp)
 A....D aac                  AAC (Advanced Audio Coding)
 A....D libfdk_aac           Fraunhofer FDK AAC (codec aac)
";

    #[test]
    fn test_encoder_listed_matches_name_column() {
        assert!(encoder_listed(LISTING, "libfdk_aac"));
        assert!(encoder_listed(LISTING, "aac"));
        assert!(!encoder_listed(LISTING, "fdk"));
        assert!(!encoder_listed(LISTING, "not-libfdk_aac"));
        // Description words are not encoder names
        assert!(!encoder_listed(LISTING, "Fraunhofer"));
    }

    #[test]
    fn test_missing_binary_is_dependency_error() {
        let result = check_dependency("surely-not-an-ffmpeg-binary-42");
        assert!(matches!(result, Err(CoreError::DependencyNotFound(_))));

        let result = check_encoder("surely-not-an-ffmpeg-binary-42", "libfdk_aac");
        assert!(matches!(result, Err(CoreError::DependencyNotFound(_))));
    }
}
