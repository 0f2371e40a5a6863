//! Container tag reading.
//!
//! The pipeline never parses audio containers itself. A [`TagReader`]
//! returns the raw tag fields of one file; [`LoftyTagReader`] is the
//! production implementation.

use crate::error::{CoreError, CoreResult};

use lofty::prelude::*;
use std::path::Path;

/// Raw tag fields of one audio file. Every field is optional; whether a
/// file is acceptable is decided by the metadata rules, not here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTags {
    pub title: Option<String>,
    pub album: Option<String>,
    pub artist: Option<String>,
    pub comment: Option<String>,
    pub disc: Option<u32>,
    pub disc_total: Option<u32>,
    pub track: Option<u32>,
    pub track_total: Option<u32>,
    /// Playback length in seconds
    pub duration: Option<f64>,
}

/// Reads raw tags from an audio file.
pub trait TagReader {
    fn read_tags(&self, path: &Path) -> CoreResult<RawTags>;
}

/// `TagReader` backed by the lofty crate.
#[derive(Debug, Clone, Default)]
pub struct LoftyTagReader;

impl TagReader for LoftyTagReader {
    fn read_tags(&self, path: &Path) -> CoreResult<RawTags> {
        let tagged = lofty::read_from_path(path).map_err(|e| CoreError::TagRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let seconds = tagged.properties().duration().as_secs_f64();
        let duration = (seconds > 0.0).then_some(seconds);

        let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
            log::debug!("{} carries no tag block", path.display());
            return Ok(RawTags {
                duration,
                ..Default::default()
            });
        };

        Ok(RawTags {
            title: tag.title().map(|v| v.into_owned()),
            album: tag.album().map(|v| v.into_owned()),
            artist: tag.artist().map(|v| v.into_owned()),
            comment: tag.comment().map(|v| v.into_owned()),
            disc: tag.disk(),
            disc_total: tag.disk_total(),
            track: tag.track(),
            track_total: tag.track_total(),
            duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_tag_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.mp3");

        let result = LoftyTagReader.read_tags(&path);
        match result {
            Err(CoreError::TagRead { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected TagRead error, got {other:?}"),
        }
    }
}
