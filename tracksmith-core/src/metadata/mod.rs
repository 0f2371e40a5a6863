//! Per-track metadata extraction and manifest assembly.
//!
//! Raw container tags are turned into [`TrackRecord`]s. The same
//! truthiness rule ([`missing_fields`]) is used by validation and by
//! extraction, so a file that passed validation always extracts.

pub mod transcripts;

use crate::config::KeyStyle;
use crate::discovery::file_stem_safe;
use crate::error::{CoreError, CoreResult};
use crate::external::{RawTags, TagReader};
use crate::manifest::Manifest;

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One manifest entry, serialized with the field names the player expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRecord {
    /// Source file stem
    pub filename: String,
    pub album: String,
    pub artist: String,
    pub title: String,
    /// Comment tag; empty when the file has none
    pub display_description: String,
    /// Milliseconds, truncated
    pub duration: u64,
    pub disc: u32,
    pub disc_total: u32,
    pub track: u32,
    pub track_total: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Extras>,
}

/// Optional data attached to a track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extras {
    /// Locale code to transcript lines
    pub transcripts: BTreeMap<String, Vec<String>>,
}

/// Converts a duration in seconds to whole milliseconds by truncation.
///
/// `floor(seconds * 1000)`: 30.0399 s is 30039 ms, not 30040.
#[must_use]
pub fn duration_millis(seconds: f64) -> u64 {
    (seconds * 1000.0).floor() as u64
}

fn text_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

fn number_present(value: Option<u32>) -> bool {
    value.is_some_and(|v| v > 0)
}

/// Lists the required fields `tags` lacks, by manifest field name.
///
/// A field is present only when it is non-null, non-empty and non-zero.
/// Whitespace counts as content. The description is optional and never
/// reported.
pub fn missing_fields(tags: &RawTags) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if !text_present(&tags.album) {
        missing.push("album");
    }
    if !text_present(&tags.artist) {
        missing.push("artist");
    }
    if !text_present(&tags.title) {
        missing.push("title");
    }
    if !tags.duration.is_some_and(|s| duration_millis(s) > 0) {
        missing.push("duration");
    }
    if !number_present(tags.disc) {
        missing.push("disc");
    }
    if !number_present(tags.disc_total) {
        missing.push("discTotal");
    }
    if !number_present(tags.track) {
        missing.push("track");
    }
    if !number_present(tags.track_total) {
        missing.push("trackTotal");
    }
    missing
}

/// Builds the record for one file from its tags.
///
/// # Returns
///
/// * `Err(CoreError::MissingTags)` - naming the file and the absent fields
/// * `Err(CoreError::TagRead)` - if the tags cannot be read at all
pub fn extract_one<R: TagReader + ?Sized>(reader: &R, path: &Path) -> CoreResult<TrackRecord> {
    let filename = file_stem_safe(path)?;
    let tags = reader.read_tags(path)?;

    let missing = missing_fields(&tags);
    if !missing.is_empty() {
        return Err(CoreError::MissingTags {
            path: path.to_path_buf(),
            fields: missing,
        });
    }

    // missing_fields guarantees every value below is present; text is kept verbatim
    Ok(TrackRecord {
        filename,
        album: tags.album.unwrap_or_default(),
        artist: tags.artist.unwrap_or_default(),
        title: tags.title.unwrap_or_default(),
        display_description: tags.comment.unwrap_or_default(),
        duration: duration_millis(tags.duration.unwrap_or_default()),
        disc: tags.disc.unwrap_or_default(),
        disc_total: tags.disc_total.unwrap_or_default(),
        track: tags.track.unwrap_or_default(),
        track_total: tags.track_total.unwrap_or_default(),
        extras: None,
    })
}

/// Builds the manifest for `files`, preserving their order.
///
/// `files` is expected to be the sorted listing from discovery. Each record
/// gets its transcripts attached; the key follows `key_style`. Stops at the
/// first file that fails to extract.
pub fn extract_all<R: TagReader + ?Sized>(
    reader: &R,
    files: &[PathBuf],
    key_style: &KeyStyle,
) -> CoreResult<Manifest> {
    let mut manifest = Manifest::new();

    for (index, path) in files.iter().enumerate() {
        let mut record = extract_one(reader, path)?;

        let transcripts = transcripts::collect_transcripts(path)?;
        if !transcripts.is_empty() {
            log::debug!(
                "{}: {} transcript(s) ({})",
                record.filename,
                transcripts.len(),
                transcripts.keys().cloned().collect::<Vec<_>>().join(", ")
            );
            record.extras = Some(Extras { transcripts });
        }

        let key = key_style.key_for(index, &record.filename);
        manifest.insert(key, record)?;
    }

    log::info!("Extracted metadata for {} track(s)", manifest.len());
    Ok(manifest)
}
