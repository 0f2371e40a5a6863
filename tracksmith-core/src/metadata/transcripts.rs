// tracksmith-core/src/metadata/transcripts.rs
//
// Plain-text transcripts stored beside the audio as <stem>_<locale>.txt.

use crate::discovery::find_transcript_files;
use crate::error::CoreResult;

use std::collections::BTreeMap;
use std::path::Path;

/// Reads one transcript: lines are trimmed and blank lines dropped.
///
/// Fails with `CoreError::Io` when the file is not valid UTF-8.
pub fn read_transcript(path: &Path) -> CoreResult<Vec<String>> {
    let text = std::fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// All transcripts of `audio_path`, keyed by locale.
pub fn collect_transcripts(audio_path: &Path) -> CoreResult<BTreeMap<String, Vec<String>>> {
    let mut transcripts = BTreeMap::new();
    for (locale, path) in find_transcript_files(audio_path)? {
        let lines = read_transcript(&path)?;
        log::debug!("Read {} line(s) from {}", lines.len(), path.display());
        transcripts.insert(locale, lines);
    }
    Ok(transcripts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_transcript_trims_and_skips_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t_en.txt");
        std::fs::write(&path, "  First line\r\n\n\t\nSecond línea  \n").unwrap();

        let lines = read_transcript(&path).unwrap();
        assert_eq!(lines, vec!["First line", "Second línea"]);
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t_en.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(read_transcript(&path).is_err());
    }

    #[test]
    fn test_collect_transcripts_orders_locales() {
        let dir = tempdir().unwrap();
        let audio = dir.path().join("t.mp3");
        std::fs::write(&audio, b"").unwrap();
        std::fs::write(dir.path().join("t_ja.txt"), "こんにちは\n").unwrap();
        std::fs::write(dir.path().join("t_de.txt"), "Hallo\n").unwrap();

        let transcripts = collect_transcripts(&audio).unwrap();
        assert_eq!(transcripts.keys().collect::<Vec<_>>(), vec!["de", "ja"]);
        assert_eq!(transcripts["ja"], vec!["こんにちは"]);
    }
}
