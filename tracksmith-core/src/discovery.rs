//! File discovery for the input directory.
//!
//! Every listing produced here is sorted lexicographically by path. Manifest
//! key order, transcode order and validation counts all derive from these
//! listings, so the order never depends on how the filesystem happens to
//! return directory entries.

use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

/// Returns true for a regular file whose extension equals `extension`
/// (case-insensitive, without the dot).
#[must_use]
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Finds audio files with `extension` in the top level of `input_dir`.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - The files, sorted by path
/// * `Err(CoreError::Io)` - If the directory cannot be read
/// * `Err(CoreError::NoFilesFound)` - If no matching file exists
///
/// # Examples
///
/// ```rust,no_run
/// use tracksmith_core::find_audio_files;
/// use std::path::Path;
///
/// let files = find_audio_files(Path::new("/path/to/book"), "mp3").unwrap();
/// for file in files {
///     println!("{}", file.display());
/// }
/// ```
pub fn find_audio_files(input_dir: &Path, extension: &str) -> CoreResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(input_dir)?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            has_extension(&path, extension).then_some(path)
        })
        .collect();

    if files.is_empty() {
        return Err(CoreError::NoFilesFound);
    }

    files.sort();
    log::debug!(
        "Found {} .{} file(s) in {}",
        files.len(),
        extension,
        input_dir.display()
    );
    Ok(files)
}

/// Locates a cover or art image in `input_dir`.
///
/// An explicit name wins. Otherwise `default_name` (e.g. `cover.jpg`) is
/// used when present, and failing that the first file, in sorted order,
/// whose stem equals `stem` (e.g. `cover.png`, or an extensionless `cover`).
pub fn locate_image(
    input_dir: &Path,
    explicit: Option<&str>,
    default_name: &str,
    stem: &str,
) -> Option<PathBuf> {
    if let Some(name) = explicit {
        let path = input_dir.join(name);
        return path.is_file().then_some(path);
    }

    let default_path = input_dir.join(default_name);
    if default_path.is_file() {
        return Some(default_path);
    }

    let mut candidates: Vec<PathBuf> = std::fs::read_dir(input_dir)
        .ok()?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            let matches = path.is_file()
                && path.file_stem().and_then(|s| s.to_str()) == Some(stem);
            matches.then_some(path)
        })
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

/// Finds transcript files `<stem>_<locale>.txt` beside `audio_path`.
///
/// Returns `(locale, path)` pairs sorted by locale. The locale is the text
/// after `<stem>_` and must not itself contain an underscore, so a track
/// named `part_1` does not pick up transcripts of `part_1_b`.
pub fn find_transcript_files(audio_path: &Path) -> CoreResult<Vec<(String, PathBuf)>> {
    let stem = file_stem_safe(audio_path)?;
    let Some(dir) = audio_path.parent() else {
        return Ok(Vec::new());
    };
    let prefix = format!("{stem}_");

    let mut found: Vec<(String, PathBuf)> = std::fs::read_dir(dir)?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if !has_extension(&path, "txt") {
                return None;
            }
            let file_stem = path.file_stem()?.to_str()?;
            let locale = file_stem.strip_prefix(&prefix)?;
            if locale.is_empty() || locale.contains('_') {
                return None;
            }
            Some((locale.to_string(), path))
        })
        .collect();

    found.sort();
    Ok(found)
}

/// Returns the file stem of `path` as a String.
pub fn file_stem_safe(path: &Path) -> CoreResult<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            CoreError::PathError(format!("Failed to get file stem for {}", path.display()))
        })
}
