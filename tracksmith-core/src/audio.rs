// ============================================================================
// tracksmith-core/src/audio.rs
// ============================================================================
//
// AUDIO TRANSCODING: Speech-tuned HE-AAC outputs via ffmpeg
//
// Each source track is transcoded to a mono HE-AAC file named after its
// manifest key. Container metadata is carried over. Files are processed one
// at a time in listing order; the first failure stops the batch and files
// already written are left in place.

use crate::config::{AudioEncoderConfig, KeyStyle};
use crate::discovery::file_stem_safe;
use crate::error::{CoreResult, command_failed_error};
use crate::external::FfmpegSpawner;
use crate::external::ffmpeg_executor::run_to_completion;
use crate::layout::OutputLayout;

use ffmpeg_sidecar::command::FfmpegCommand;
use std::path::{Path, PathBuf};

/// One transcoded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeOutput {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub original_size: u64,
    pub transcoded_size: u64,
}

impl TranscodeOutput {
    /// Bytes saved; negative when the output is larger.
    pub fn size_delta(&self) -> i64 {
        self.original_size as i64 - self.transcoded_size as i64
    }
}

/// Result of a transcode batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscodeSummary {
    pub outputs: Vec<TranscodeOutput>,
    /// Sum of the per-file deltas
    pub bytes_saved: i64,
}

/// Builds the ffmpeg invocation for one file.
///
/// `-hide_banner -y -i <src> -vn -map_metadata 0 -c:a <encoder>
/// -profile:a <profile> -b:a <bitrate> -ac <channels> -ar <rate> <dest>`
pub fn build_transcode_command(
    source: &Path,
    dest: &Path,
    settings: &AudioEncoderConfig,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    cmd.arg("-hide_banner").arg("-y");
    cmd.input(&*source.to_string_lossy());
    // Drop embedded cover art streams
    cmd.arg("-vn");
    cmd.args(["-map_metadata", "0"]);
    cmd.args(["-c:a", settings.encoder.as_str()]);
    cmd.args(["-profile:a", settings.profile.as_str()]);
    cmd.args(["-b:a", settings.bitrate.as_str()]);
    cmd.args(["-ac", settings.channels.to_string().as_str()]);
    cmd.args(["-ar", settings.sample_rate.to_string().as_str()]);
    cmd.output(&*dest.to_string_lossy());
    cmd
}

fn transcode_file<S: FfmpegSpawner>(
    spawner: &S,
    source: &Path,
    dest: &Path,
    settings: &AudioEncoderConfig,
) -> CoreResult<TranscodeOutput> {
    let original_size = std::fs::metadata(source)?.len();

    let cmd = build_transcode_command(source, dest, settings);
    let (status, stderr) = run_to_completion(spawner, cmd)?;
    if !status.success() {
        log::error!("ffmpeg failed on {}: {}", source.display(), stderr);
        return Err(command_failed_error(
            format!("ffmpeg ({})", source.display()),
            status,
            stderr,
        ));
    }

    let transcoded_size = std::fs::metadata(dest)?.len();
    Ok(TranscodeOutput {
        source: source.to_path_buf(),
        dest: dest.to_path_buf(),
        original_size,
        transcoded_size,
    })
}

/// Transcodes `source` to `dest` and returns `original - transcoded` size
/// in bytes. The value is informational and may be negative.
///
/// # Returns
///
/// * `Err(CoreError::CommandStart)` - if ffmpeg cannot be spawned
/// * `Err(CoreError::CommandFailed)` - on a non-zero exit
pub fn transcode<S: FfmpegSpawner>(
    spawner: &S,
    source: &Path,
    dest: &Path,
    settings: &AudioEncoderConfig,
) -> CoreResult<i64> {
    transcode_file(spawner, source, dest, settings).map(|out| out.size_delta())
}

/// Transcodes every file in `files`, in order, into the assets directory.
///
/// Outputs are named after the manifest key of each file. `on_progress` is
/// called before each file with its zero-based index and the total.
pub fn transcode_all<S, F>(
    spawner: &S,
    files: &[PathBuf],
    layout: &OutputLayout,
    settings: &AudioEncoderConfig,
    key_style: &KeyStyle,
    mut on_progress: F,
) -> CoreResult<TranscodeSummary>
where
    S: FfmpegSpawner,
    F: FnMut(usize, usize, &Path),
{
    let mut summary = TranscodeSummary::default();

    for (index, source) in files.iter().enumerate() {
        on_progress(index, files.len(), source);

        let key = key_style.key_for(index, &file_stem_safe(source)?);
        let dest = layout.audio_path(&key, &settings.container_extension);
        let output = transcode_file(spawner, source, &dest, settings)?;

        log::info!(
            "Transcoded {} -> {} ({} -> {} bytes)",
            source.display(),
            dest.display(),
            output.original_size,
            output.transcoded_size
        );
        summary.bytes_saved += output.size_delta();
        summary.outputs.push(output);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::external::mocks::MockFfmpegSpawner;
    use crate::layout::ensure_layout;
    use tempfile::tempdir;

    fn contains_pair(args: &[String], flag: &str, value: &str) -> bool {
        args.windows(2).any(|w| w[0] == flag && w[1] == value)
    }

    #[test]
    fn test_command_arguments() {
        let mut cmd = build_transcode_command(
            Path::new("/in/ch 01.mp3"),
            Path::new("/out/assets/ch 01.m4a"),
            &AudioEncoderConfig::default(),
        );
        let args: Vec<String> = cmd
            .as_inner()
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert!(args.iter().any(|a| a == "-hide_banner"));
        assert!(args.iter().any(|a| a == "-y"));
        assert!(args.iter().any(|a| a == "-vn"));
        assert!(contains_pair(&args, "-i", "/in/ch 01.mp3"));
        assert!(contains_pair(&args, "-map_metadata", "0"));
        assert!(contains_pair(&args, "-c:a", "libfdk_aac"));
        assert!(contains_pair(&args, "-profile:a", "aac_he"));
        assert!(contains_pair(&args, "-b:a", "40k"));
        assert!(contains_pair(&args, "-ac", "1"));
        assert!(contains_pair(&args, "-ar", "44100"));
        assert_eq!(args.last().map(String::as_str), Some("/out/assets/ch 01.m4a"));
    }

    #[test]
    fn test_transcode_reports_size_delta() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("a.mp3");
        std::fs::write(&source, vec![0u8; 1000]).unwrap();
        let dest = dir.path().join("a.m4a");

        let spawner = MockFfmpegSpawner::new().with_output_size(400);
        let delta = transcode(&spawner, &source, &dest, &AudioEncoderConfig::default()).unwrap();
        assert_eq!(delta, 600);

        // Growth is reported, not rejected
        let spawner = MockFfmpegSpawner::new().with_output_size(1500);
        let delta = transcode(&spawner, &source, &dest, &AudioEncoderConfig::default()).unwrap();
        assert_eq!(delta, -500);
    }

    #[test]
    fn test_transcode_all_aborts_on_first_failure() {
        let dir = tempdir().unwrap();
        let files: Vec<PathBuf> = ["a.mp3", "b.mp3", "c.mp3"]
            .iter()
            .map(|n| {
                let p = dir.path().join(n);
                std::fs::write(&p, vec![0u8; 100]).unwrap();
                p
            })
            .collect();
        let layout = ensure_layout(&dir.path().join("out")).unwrap();

        let spawner = MockFfmpegSpawner::new().with_output_size(10);
        spawner.add_exit_error_expectation("b.mp3", 1, "Unknown encoder 'libfdk_aac'");

        let mut seen = Vec::new();
        let result = transcode_all(
            &spawner,
            &files,
            &layout,
            &AudioEncoderConfig::default(),
            &KeyStyle::Stem,
            |i, total, _| seen.push((i, total)),
        );

        match result {
            Err(CoreError::CommandFailed { cmd, stderr, .. }) => {
                assert!(cmd.contains("b.mp3"));
                assert!(stderr.contains("Unknown encoder"));
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
        assert_eq!(seen, vec![(0, 3), (1, 3)]);
        assert_eq!(spawner.get_received_calls().len(), 2);
        assert!(layout.audio_path("a", "m4a").exists());
        assert!(!layout.audio_path("c", "m4a").exists());
    }

    #[test]
    fn test_transcode_all_uses_manifest_keys() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("intro.mp3");
        std::fs::write(&source, vec![0u8; 50]).unwrap();
        let layout = ensure_layout(dir.path()).unwrap();

        let spawner = MockFfmpegSpawner::new().with_output_size(20);
        let style = KeyStyle::Sequential { prefix: "b_".into() };
        let summary = transcode_all(
            &spawner,
            &[source],
            &layout,
            &AudioEncoderConfig::default(),
            &style,
            |_, _, _| {},
        )
        .unwrap();

        assert_eq!(summary.outputs[0].dest, layout.audio_path("b_001", "m4a"));
        assert_eq!(summary.bytes_saved, 30);
    }

    #[test]
    fn test_spawn_failure_is_command_start() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("a.mp3");
        std::fs::write(&source, b"x").unwrap();

        let spawner = MockFfmpegSpawner::new();
        spawner.add_spawn_error_expectation("a.mp3");
        let result = transcode(
            &spawner,
            &source,
            &dir.path().join("a.m4a"),
            &AudioEncoderConfig::default(),
        );
        assert!(matches!(result, Err(CoreError::CommandStart(..))));
    }
}
