//! Error types for tracksmith-core.
//!
//! Errors fall into three groups: configuration and input-content problems
//! (bad paths, failed validation, missing tags), external-tool problems
//! (ffmpeg missing, encoder unavailable, transcoder failure) and data errors
//! raised while reading or writing files.

use crate::validation::ValidationReport;

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Custom error type for tracksmith operations.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation failed with {} error(s)", .0.issues().len())]
    Validation(ValidationReport),

    #[error("{} is missing required tag(s): {}", .path.display(), .fields.join(", "))]
    MissingTags {
        path: PathBuf,
        fields: Vec<&'static str>,
    },

    #[error("Failed to read tags from {}: {reason}", .path.display())]
    TagRead { path: PathBuf, reason: String },

    #[error("Failed to decode image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode {}: {reason}", .path.display())]
    ImageEncode { path: PathBuf, reason: String },

    #[error("Manifest serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Required dependency not found: {0}")]
    DependencyNotFound(String),

    #[error("Encoder '{encoder}' is not available in this ffmpeg build")]
    EncoderUnavailable { encoder: String },

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("Failed while waiting for command '{0}': {1}")]
    CommandWait(String, #[source] std::io::Error),

    #[error("Command '{cmd}' failed with {status}: {stderr}")]
    CommandFailed {
        cmd: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("No audio files found")]
    NoFilesFound,

    #[error("Invalid path: {0}")]
    PathError(String),

    #[error("{0}")]
    OperationFailed(String),
}

/// Result type for tracksmith operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// True for errors caused by the environment (ffmpeg, encoders) rather
    /// than by the contents of the input directory.
    pub fn is_external_tool_error(&self) -> bool {
        matches!(
            self,
            CoreError::DependencyNotFound(_)
                | CoreError::EncoderUnavailable { .. }
                | CoreError::CommandStart(..)
                | CoreError::CommandWait(..)
                | CoreError::CommandFailed { .. }
        )
    }
}

pub fn command_start_error(cmd: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

pub fn command_wait_error(cmd: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        cmd: cmd.into(),
        status,
        stderr: stderr.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tags_message_names_file_and_fields() {
        let err = CoreError::MissingTags {
            path: PathBuf::from("/in/track_01.mp3"),
            fields: vec!["album", "trackTotal"],
        };
        let msg = err.to_string();
        assert!(msg.contains("track_01.mp3"));
        assert!(msg.contains("album, trackTotal"));
    }

    #[test]
    fn test_external_tool_classification() {
        assert!(CoreError::DependencyNotFound("ffmpeg".into()).is_external_tool_error());
        assert!(
            CoreError::EncoderUnavailable {
                encoder: "libfdk_aac".into()
            }
            .is_external_tool_error()
        );
        assert!(!CoreError::NoFilesFound.is_external_tool_error());
        assert!(!CoreError::PathError("x".into()).is_external_tool_error());
    }
}
