//! The ordered track manifest and its `tracks.json` writer.
//!
//! Keys keep insertion order, which is the sorted order of the input
//! listing. Together with the fixed field order of [`TrackRecord`] this
//! makes the written bytes a pure function of the inputs.

use crate::config::MANIFEST_FILENAME;
use crate::error::{CoreError, CoreResult};
use crate::metadata::TrackRecord;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Ordered mapping from manifest key to track record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    entries: Vec<(String, TrackRecord)>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. Keys must be unique within a manifest.
    pub fn insert(&mut self, key: String, record: TrackRecord) -> CoreResult<()> {
        if self.get(&key).is_some() {
            return Err(CoreError::OperationFailed(format!(
                "Duplicate manifest key '{key}' (from {})",
                record.filename
            )));
        }
        self.entries.push((key, record));
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&TrackRecord> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, record)| record)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TrackRecord)> {
        self.entries.iter().map(|(k, r)| (k.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The exact `tracks.json` contents: four-space indentation, UTF-8
    /// text kept literal, trailing newline.
    pub fn to_json_string(&self) -> CoreResult<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        buf.push(b'\n');
        String::from_utf8(buf)
            .map_err(|e| CoreError::OperationFailed(format!("Manifest is not UTF-8: {e}")))
    }
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, record) in &self.entries {
            map.serialize_entry(key, record)?;
        }
        map.end()
    }
}

/// Writes `manifest` to `<output_root>/tracks.json`, replacing any
/// previous file. The contents go to a temporary file in the same
/// directory first so readers never observe a partial manifest.
pub fn write_manifest(manifest: &Manifest, output_root: &Path) -> CoreResult<PathBuf> {
    let target = output_root.join(MANIFEST_FILENAME);
    let json = manifest.to_json_string()?;

    let mut tmp = tempfile::NamedTempFile::new_in(output_root)?;
    tmp.write_all(json.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(&target).map_err(|e| CoreError::Io(e.error))?;

    log::info!(
        "Wrote {} with {} track(s)",
        target.display(),
        manifest.len()
    );
    Ok(target)
}
