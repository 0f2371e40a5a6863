use crate::error::{CoreError, CoreResult};
use crate::images::ImageRole;

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::path::PathBuf;
use thiserror::Error;

/// A problem that prevents the run from starting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("Input directory does not exist: {}", .path.display())]
    InputDirMissing { path: PathBuf },

    #[error("Input directory cannot be read: {} ({reason})", .path.display())]
    InputDirUnreadable { path: PathBuf, reason: String },

    #[error("Output directory does not exist: {}", .path.display())]
    OutputDirMissing { path: PathBuf },

    #[error("No operation selected; use --json, --images and/or --transcode")]
    NoOperationSelected,

    #[error("No {role} image found (looked for {name})")]
    ImageNotFound { role: ImageRole, name: String },

    #[error("The {role} image {} cannot be decoded: {reason}", .path.display())]
    ImageUnreadable {
        role: ImageRole,
        path: PathBuf,
        reason: String,
    },

    #[error("The {role} image is {width}x{height}; both sides must be at least {min}px")]
    ResolutionTooLow {
        role: ImageRole,
        width: u32,
        height: u32,
        min: u32,
    },

    #[error("The art image must be square, got {width}x{height}")]
    ArtNotSquare { width: u32, height: u32 },

    #[error("No .{extension} files found in the input directory")]
    NoAudioFiles { extension: String },

    #[error("{} of {total} file(s) missing required tags", .files.len())]
    MissingTags { files: Vec<PathBuf>, total: usize },

    #[error("Files {} all map to the key '{key}'", file_names(.files))]
    DuplicateKey { key: String, files: Vec<PathBuf> },

    #[error("Transcript {} cannot be read: {reason}", .path.display())]
    TranscriptUnreadable { path: PathBuf, reason: String },
}

fn file_names(files: &[PathBuf]) -> String {
    files
        .iter()
        .map(|f| {
            f.file_name()
                .map_or_else(|| f.display().to_string(), |n| n.to_string_lossy().into_owned())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationIssue {
    /// Report section the issue is listed under.
    pub fn category(&self) -> &'static str {
        match self {
            ValidationIssue::InputDirMissing { .. }
            | ValidationIssue::InputDirUnreadable { .. }
            | ValidationIssue::OutputDirMissing { .. } => "Directories",
            ValidationIssue::NoOperationSelected => "Operations",
            ValidationIssue::ImageNotFound { .. }
            | ValidationIssue::ImageUnreadable { .. }
            | ValidationIssue::ResolutionTooLow { .. }
            | ValidationIssue::ArtNotSquare { .. } => "Images",
            ValidationIssue::NoAudioFiles { .. }
            | ValidationIssue::MissingTags { .. }
            | ValidationIssue::DuplicateKey { .. }
            | ValidationIssue::TranscriptUnreadable { .. } => "Audio",
        }
    }
}

/// A non-fatal observation, such as an image that will be upscaled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub message: String,
    pub category: String,
}

impl Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)
    }
}

/// Everything validation found, in the order it was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
    warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an issue with immediate logging
    pub fn add_issue(&mut self, issue: ValidationIssue) {
        log::error!("[ERROR] {}: {}", issue.category(), issue);
        if let ValidationIssue::MissingTags { files, .. } = &issue {
            for file in files {
                log::debug!("  missing tags: {}", file.display());
            }
        }
        self.issues.push(issue);
    }

    /// Add a warning with immediate logging
    pub fn add_warning<S: Into<String>, C: Into<String>>(&mut self, message: S, category: C) {
        let warning = ValidationWarning {
            message: message.into(),
            category: category.into(),
        };
        log::warn!("[WARNING] {}", warning);
        self.warnings.push(warning);
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// True when no issue was recorded. Warnings do not fail a report.
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }

    /// Converts a failed report into `CoreError::Validation`.
    pub fn into_result(self) -> CoreResult<Self> {
        if self.passed() {
            Ok(self)
        } else {
            Err(CoreError::Validation(self))
        }
    }

    /// Generate a formatted validation report
    pub fn format(&self) -> String {
        let mut lines = Vec::new();

        lines.push("=".repeat(60));
        lines.push(format!(
            "VALIDATION REPORT - {}",
            if self.passed() { "PASSED" } else { "FAILED" }
        ));
        lines.push("=".repeat(60));

        // Group by category, sorted for stable output
        let mut categories: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for issue in &self.issues {
            categories
                .entry(issue.category())
                .or_default()
                .push(format!("[ERROR] {issue}"));
        }
        for warning in &self.warnings {
            categories
                .entry(warning.category.as_str())
                .or_default()
                .push(format!("[WARNING] {}", warning.message));
        }

        for (category, messages) in categories {
            lines.push(format!("{category}:"));
            for msg in messages {
                lines.push(format!("  {msg}"));
            }
        }

        lines.push("-".repeat(60));
        lines.push(format!(
            "{} error(s), {} warning(s)",
            self.issues.len(),
            self.warnings.len()
        ));
        lines.join("\n")
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tags_message_reports_count() {
        let issue = ValidationIssue::MissingTags {
            files: vec![PathBuf::from("a.mp3"), PathBuf::from("c.mp3")],
            total: 5,
        };
        assert_eq!(issue.to_string(), "2 of 5 file(s) missing required tags");
        assert_eq!(issue.category(), "Audio");
    }

    #[test]
    fn test_duplicate_key_message_names_files() {
        let issue = ValidationIssue::DuplicateKey {
            key: "a".into(),
            files: vec![PathBuf::from("/book/a.MP3"), PathBuf::from("/book/a.mp3")],
        };
        assert_eq!(issue.to_string(), "Files a.MP3, a.mp3 all map to the key 'a'");
        assert_eq!(issue.category(), "Audio");
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let mut report = ValidationReport::new();
        report.add_warning("cover will be upscaled", "Images");
        assert!(report.passed());
        assert!(report.clone().into_result().is_ok());

        report.add_issue(ValidationIssue::NoOperationSelected);
        assert!(!report.passed());
        match report.into_result() {
            Err(CoreError::Validation(r)) => assert_eq!(r.issues().len(), 1),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_format_groups_by_category() {
        let mut report = ValidationReport::new();
        report.add_issue(ValidationIssue::ArtNotSquare { width: 1200, height: 1000 });
        report.add_issue(ValidationIssue::NoAudioFiles { extension: "mp3".into() });
        report.add_warning("cover will be upscaled", "Images");

        let text = report.format();
        assert!(text.contains("FAILED"));
        let audio = text.find("Audio:").unwrap();
        let images = text.find("Images:").unwrap();
        assert!(audio < images);
        assert!(text.contains("[ERROR] The art image must be square, got 1200x1000"));
        assert!(text.contains("[WARNING] cover will be upscaled"));
        assert!(text.contains("2 error(s), 1 warning(s)"));
    }
}
