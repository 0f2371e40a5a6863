// ============================================================================
// tracksmith-core/src/pipeline.rs
// ============================================================================
//
// PIPELINE: Orchestration of one packaging run
//
// 1. Validate every input for the selected operations (no side effects)
// 2. Preflight the transcoder when transcoding was selected
// 3. Create the output layout
// 4. Manifest, then images, then audio
//
// Steps 1 and 2 complete before anything is written, so a run that fails
// validation or lacks a usable ffmpeg leaves the filesystem untouched.

use crate::audio::{TranscodeSummary, transcode_all};
use crate::config::{AudioEncoderConfig, CoreConfig, DEFAULT_ART_NAME, DEFAULT_COVER_NAME};
use crate::discovery::{find_audio_files, locate_image};
use crate::error::{CoreError, CoreResult};
use crate::external::{
    FFMPEG_BINARY, FfmpegSpawner, LoftyTagReader, SidecarSpawner, TagReader, check_transcoder,
};
use crate::images::{ImageAsset, ImageRole, process_art, process_cover};
use crate::layout::{OutputLayout, ensure_layout};
use crate::manifest::write_manifest;
use crate::metadata::extract_all;
use crate::validation::{ValidationWarning, validate};

use std::path::{Path, PathBuf};

/// What a completed run produced.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of manifest entries written
    pub tracks: usize,
    /// Sum of the track durations, in milliseconds
    pub total_duration_ms: u64,
    pub manifest_path: Option<PathBuf>,
    pub images: Vec<ImageAsset>,
    pub transcode: Option<TranscodeSummary>,
    /// Non-fatal validation findings
    pub warnings: Vec<ValidationWarning>,
}

/// Runs the pipeline with the production collaborators: lofty for tags,
/// ffmpeg-sidecar for transcoding and a real ffmpeg preflight.
pub fn run_default<F>(config: &CoreConfig, on_progress: F) -> CoreResult<RunSummary>
where
    F: FnMut(usize, usize, &Path),
{
    run(
        config,
        &LoftyTagReader,
        &SidecarSpawner,
        |audio: &AudioEncoderConfig| check_transcoder(FFMPEG_BINARY, &audio.encoder),
        on_progress,
    )
}

/// Runs the selected operations for `config`.
///
/// `preflight` is only called when transcoding is selected, after
/// validation passed and before any directory is created.
/// `on_progress` receives `(index, total, source)` before each transcode.
pub fn run<R, S, P, F>(
    config: &CoreConfig,
    reader: &R,
    spawner: &S,
    preflight: P,
    on_progress: F,
) -> CoreResult<RunSummary>
where
    R: TagReader + ?Sized,
    S: FfmpegSpawner,
    P: FnOnce(&AudioEncoderConfig) -> CoreResult<()>,
    F: FnMut(usize, usize, &Path),
{
    let report = validate(config, reader).into_result()?;
    let ops = config.operations;

    if ops.transcode {
        preflight(&config.audio)?;
    }

    let layout = ensure_layout(config.output_root())?;
    let mut summary = RunSummary {
        warnings: report.warnings().to_vec(),
        ..Default::default()
    };

    if ops.manifest {
        let files = find_audio_files(&config.input_dir, &config.audio_extension)?;
        let manifest = extract_all(reader, &files, &config.key_style)?;
        summary.tracks = manifest.len();
        summary.total_duration_ms = manifest.iter().map(|(_, r)| r.duration).sum();
        summary.manifest_path = Some(write_manifest(&manifest, layout.root())?);
    }

    if ops.images {
        summary.images = write_images(config, &layout)?;
    }

    if ops.transcode {
        let files = find_audio_files(&config.input_dir, &config.audio_extension)?;
        log::info!("Transcoding {} file(s)", files.len());
        let transcoded = transcode_all(
            spawner,
            &files,
            &layout,
            &config.audio,
            &config.key_style,
            on_progress,
        )?;
        summary.transcode = Some(transcoded);
    }

    log::info!("Run complete for {}", config.input_dir.display());
    Ok(summary)
}

fn located(config: &CoreConfig, role: ImageRole) -> CoreResult<PathBuf> {
    let (explicit, default_name, stem) = match role {
        ImageRole::Cover => (config.cover_name.as_deref(), DEFAULT_COVER_NAME, "cover"),
        ImageRole::Art => (config.art_name.as_deref(), DEFAULT_ART_NAME, "art"),
    };
    locate_image(&config.input_dir, explicit, default_name, stem).ok_or_else(|| {
        CoreError::PathError(format!(
            "The {role} image disappeared from {}",
            config.input_dir.display()
        ))
    })
}

fn write_images(config: &CoreConfig, layout: &OutputLayout) -> CoreResult<Vec<ImageAsset>> {
    let cover = located(config, ImageRole::Cover)?;
    let art = located(config, ImageRole::Art)?;

    let mut assets = process_cover(&cover, layout, &config.images)?;
    assets.push(process_art(&art, layout, &config.images)?);
    Ok(assets)
}
