//! Input validation
//!
//! Responsibilities:
//! - Check the input and output directories
//! - Check that at least one operation was selected
//! - Locate, decode and measure the cover and art images
//! - Check every audio file for the required tags
//! - Check that manifest keys are unique and transcripts readable
//!
//! Validation reads but never writes. It collects every problem it finds
//! into a [`ValidationReport`] so the user sees them all at once; the
//! pipeline refuses to create any output unless the report passed.

use crate::config::{CoreConfig, DEFAULT_ART_NAME, DEFAULT_COVER_NAME};
use crate::discovery::{file_stem_safe, find_audio_files, find_transcript_files, locate_image};
use crate::error::CoreError;
use crate::external::TagReader;
use crate::images::ImageRole;
use crate::metadata::missing_fields;
use crate::metadata::transcripts::read_transcript;

use std::collections::BTreeMap;
use std::path::PathBuf;

pub mod images;
pub mod report;

pub use report::{ValidationIssue, ValidationReport, ValidationWarning};

/// Validates `config` against the contents of its input directory.
///
/// Only the checks relevant to the selected operations run.
pub fn validate<R: TagReader + ?Sized>(config: &CoreConfig, reader: &R) -> ValidationReport {
    let mut report = ValidationReport::new();
    log::info!("Validating {}", config.input_dir.display());

    if !config.operations.any() {
        report.add_issue(ValidationIssue::NoOperationSelected);
    }

    if let Some(output_dir) = &config.output_dir {
        if !output_dir.is_dir() {
            report.add_issue(ValidationIssue::OutputDirMissing {
                path: output_dir.clone(),
            });
        }
    }

    if !config.input_dir.is_dir() {
        report.add_issue(ValidationIssue::InputDirMissing {
            path: config.input_dir.clone(),
        });
        // Nothing else can be checked without the inputs
        return report;
    }

    if config.operations.images {
        validate_image_sources(config, &mut report);
    }

    if config.operations.manifest || config.operations.transcode {
        if let Some(files) = audio_listing(config, &mut report) {
            validate_keys(config, &files, &mut report);
            if config.operations.manifest {
                validate_tags(&files, reader, &mut report);
                validate_transcripts(&files, &mut report);
            }
        }
    }

    if report.passed() {
        log::info!("Validation passed: {} warning(s)", report.warnings().len());
    } else {
        log::error!(
            "Validation failed: {} error(s), {} warning(s)",
            report.issues().len(),
            report.warnings().len()
        );
    }
    report
}

fn validate_image_sources(config: &CoreConfig, report: &mut ValidationReport) {
    let sources = [
        (ImageRole::Cover, config.cover_name.as_deref(), DEFAULT_COVER_NAME, "cover"),
        (ImageRole::Art, config.art_name.as_deref(), DEFAULT_ART_NAME, "art"),
    ];

    for (role, explicit, default_name, stem) in sources {
        match locate_image(&config.input_dir, explicit, default_name, stem) {
            Some(path) => images::check_image(role, &path, config, report),
            None => report.add_issue(ValidationIssue::ImageNotFound {
                role,
                name: explicit.unwrap_or(default_name).to_string(),
            }),
        }
    }
}

fn audio_listing(config: &CoreConfig, report: &mut ValidationReport) -> Option<Vec<PathBuf>> {
    match find_audio_files(&config.input_dir, &config.audio_extension) {
        Ok(files) => Some(files),
        Err(CoreError::NoFilesFound) => {
            report.add_issue(ValidationIssue::NoAudioFiles {
                extension: config.audio_extension.clone(),
            });
            None
        }
        Err(e) => {
            report.add_issue(ValidationIssue::InputDirUnreadable {
                path: config.input_dir.clone(),
                reason: e.to_string(),
            });
            None
        }
    }
}

/// Manifest entries and audio outputs are both named by key; keys must be
/// unique across the listing.
fn validate_keys(config: &CoreConfig, files: &[PathBuf], report: &mut ValidationReport) {
    let mut by_key: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();

    for (index, file) in files.iter().enumerate() {
        match file_stem_safe(file) {
            Ok(stem) => by_key
                .entry(config.key_style.key_for(index, &stem))
                .or_default()
                .push(file.clone()),
            Err(e) => report.add_issue(ValidationIssue::InputDirUnreadable {
                path: file.clone(),
                reason: e.to_string(),
            }),
        }
    }

    for (key, files) in by_key {
        if files.len() > 1 {
            report.add_issue(ValidationIssue::DuplicateKey { key, files });
        }
    }
}

fn validate_transcripts(files: &[PathBuf], report: &mut ValidationReport) {
    for file in files {
        let transcripts = match find_transcript_files(file) {
            Ok(found) => found,
            Err(e) => {
                report.add_issue(ValidationIssue::TranscriptUnreadable {
                    path: file.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        for (_, path) in transcripts {
            if let Err(e) = read_transcript(&path) {
                report.add_issue(ValidationIssue::TranscriptUnreadable {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }
}

fn validate_tags<R: TagReader + ?Sized>(
    files: &[PathBuf],
    reader: &R,
    report: &mut ValidationReport,
) {
    let mut offending = Vec::new();

    for file in files {
        match reader.read_tags(file) {
            Ok(tags) => {
                let missing = missing_fields(&tags);
                if !missing.is_empty() {
                    log::debug!("{}: missing {}", file.display(), missing.join(", "));
                    offending.push(file.clone());
                }
            }
            Err(e) => {
                log::debug!("{}: {}", file.display(), e);
                offending.push(file.clone());
            }
        }
    }

    if !offending.is_empty() {
        report.add_issue(ValidationIssue::MissingTags {
            files: offending,
            total: files.len(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CoreConfigBuilder, KeyStyle};
    use crate::external::mocks::{MockTagReader, complete_tags};
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_no_operation_selected() {
        let dir = tempdir().unwrap();
        let config = CoreConfigBuilder::new(dir.path().to_path_buf()).build();
        let report = validate(&config, &MockTagReader::new());
        assert_eq!(report.issues(), &[ValidationIssue::NoOperationSelected]);
    }

    #[test]
    fn test_missing_directories_reported_together() {
        let dir = tempdir().unwrap();
        let config = CoreConfigBuilder::new(dir.path().join("nope"))
            .output_dir(dir.path().join("also-nope"))
            .manifest(true)
            .build();
        let report = validate(&config, &MockTagReader::new());
        assert_eq!(report.issues().len(), 2);
        assert!(matches!(report.issues()[0], ValidationIssue::OutputDirMissing { .. }));
        assert!(matches!(report.issues()[1], ValidationIssue::InputDirMissing { .. }));
    }

    #[test]
    fn test_transcode_needs_audio_files() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("a.wav")).unwrap();
        let config = CoreConfigBuilder::new(dir.path().to_path_buf())
            .transcode(true)
            .build();
        let reader = MockTagReader::new();
        let report = validate(&config, &reader);
        assert_eq!(
            report.issues(),
            &[ValidationIssue::NoAudioFiles { extension: "mp3".into() }]
        );
        // Tags are only checked for the manifest
        assert_eq!(reader.reads(), 0);
    }

    #[test]
    fn test_missing_tags_counts_offending_files() {
        let dir = tempdir().unwrap();
        let reader = MockTagReader::new();
        let mut files = Vec::new();
        for i in 1..=4 {
            let path = dir.path().join(format!("t{i}.mp3"));
            File::create(&path).unwrap();
            files.push(path);
        }
        reader.expect_tags(&files[0], complete_tags("One", 1, 4));
        let mut no_album = complete_tags("Two", 2, 4);
        no_album.album = Some(String::new());
        reader.expect_tags(&files[1], no_album);
        reader.expect_tags(&files[2], complete_tags("Three", 3, 4));
        reader.expect_failure(&files[3], "not an mp3");

        let config = CoreConfigBuilder::new(dir.path().to_path_buf())
            .manifest(true)
            .build();
        let report = validate(&config, &reader);

        assert_eq!(
            report.issues(),
            &[ValidationIssue::MissingTags {
                files: vec![files[1].clone(), files[3].clone()],
                total: 4,
            }]
        );
        assert_eq!(
            report.issues()[0].to_string(),
            "2 of 4 file(s) missing required tags"
        );
    }

    #[test]
    fn test_keys_differing_only_in_case_collide() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("a.mp3")).unwrap();
        File::create(dir.path().join("a.MP3")).unwrap();
        File::create(dir.path().join("b.mp3")).unwrap();

        let config = CoreConfigBuilder::new(dir.path().to_path_buf())
            .transcode(true)
            .build();
        let report = validate(&config, &MockTagReader::new());
        assert_eq!(
            report.issues(),
            &[ValidationIssue::DuplicateKey {
                key: "a".into(),
                files: vec![dir.path().join("a.MP3"), dir.path().join("a.mp3")],
            }]
        );

        // Sequential keys are positional and never collide
        let config = CoreConfigBuilder::new(dir.path().to_path_buf())
            .transcode(true)
            .key_style(KeyStyle::Sequential { prefix: String::new() })
            .build();
        assert!(validate(&config, &MockTagReader::new()).passed());
    }

    #[test]
    fn test_unreadable_transcript_reported_for_manifest() {
        let dir = tempdir().unwrap();
        let audio = dir.path().join("a.mp3");
        File::create(&audio).unwrap();
        std::fs::write(dir.path().join("a_en.txt"), [0xff, 0xfe, 0x00]).unwrap();
        std::fs::write(dir.path().join("a_de.txt"), "Hallo\n").unwrap();

        let reader = MockTagReader::new();
        reader.expect_tags(&audio, complete_tags("A", 1, 1));
        let config = CoreConfigBuilder::new(dir.path().to_path_buf())
            .manifest(true)
            .build();
        let report = validate(&config, &reader);

        assert_eq!(report.issues().len(), 1);
        assert!(matches!(
            &report.issues()[0],
            ValidationIssue::TranscriptUnreadable { path, .. } if path == &dir.path().join("a_en.txt")
        ));

        // Transcripts only feed the manifest
        let config = CoreConfigBuilder::new(dir.path().to_path_buf())
            .transcode(true)
            .build();
        assert!(validate(&config, &reader).passed());
    }

    #[test]
    fn test_images_not_found() {
        let dir = tempdir().unwrap();
        let config = CoreConfigBuilder::new(dir.path().to_path_buf())
            .images(true)
            .cover_name("front.png")
            .build();
        let report = validate(&config, &MockTagReader::new());
        assert_eq!(
            report.issues(),
            &[
                ValidationIssue::ImageNotFound {
                    role: ImageRole::Cover,
                    name: "front.png".into()
                },
                ValidationIssue::ImageNotFound {
                    role: ImageRole::Art,
                    name: "art.jpg".into()
                },
            ]
        );
    }
}
