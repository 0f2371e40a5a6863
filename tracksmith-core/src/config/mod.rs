//! Configuration structures and constants for the tracksmith-core library.
//!
//! A single immutable [`CoreConfig`] value describes one run: where the
//! inputs live, where outputs go, which operations were selected and the
//! fixed image/audio targets. Every pipeline component receives it (or the
//! relevant sub-struct) explicitly.

mod builder;

use std::path::{Path, PathBuf};

pub use builder::CoreConfigBuilder;

// Default constants

/// Default extension of the source audio files.
pub const DEFAULT_AUDIO_EXTENSION: &str = "mp3";

/// Conventional file name of the book cover inside the input directory.
pub const DEFAULT_COVER_NAME: &str = "cover.jpg";

/// Conventional file name of the square art image inside the input directory.
pub const DEFAULT_ART_NAME: &str = "art.jpg";

/// Minimum accepted width and height of the cover and art sources, in pixels.
pub const DEFAULT_MIN_RESOLUTION: u32 = 1000;

/// Longer-side target of the derived art image.
pub const ART_TARGET: u32 = 640;

/// WebP quality for the cover densities (0-100).
pub const COVER_QUALITY: f32 = 95.0;

/// WebP quality for the art image (0-100).
pub const ART_QUALITY: f32 = 90.0;

/// libwebp compression method, 6 being the slowest and best.
pub const WEBP_METHOD: i32 = 6;

/// Name of the manifest written at the output root.
pub const MANIFEST_FILENAME: &str = "tracks.json";

/// One display density of the cover image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Density {
    /// Label used for the density subfolder, e.g. "1.5x"
    pub label: &'static str,
    /// Pixel length of the longer side
    pub max_dimension: u32,
}

impl Density {
    /// Subfolder under `assets/images`. The base density writes directly
    /// into `images/`.
    pub fn subdir(&self) -> Option<&'static str> {
        if self.label == "1.0x" {
            None
        } else {
            Some(self.label)
        }
    }
}

/// Fixed cover density table.
pub const COVER_DENSITIES: [Density; 4] = [
    Density { label: "1.0x", max_dimension: 400 },
    Density { label: "1.5x", max_dimension: 600 },
    Density { label: "2.0x", max_dimension: 800 },
    Density { label: "2.5x", max_dimension: 1024 },
];

/// The operations a run can perform. At least one must be selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Operations {
    pub manifest: bool,
    pub images: bool,
    pub transcode: bool,
}

impl Operations {
    pub fn any(&self) -> bool {
        self.manifest || self.images || self.transcode
    }

    /// Human-readable descriptions of the selected operations, in run order.
    pub fn describe(&self) -> Vec<&'static str> {
        let mut lines = Vec::new();
        if self.manifest {
            lines.push("Create tracks.json file.");
        }
        if self.images {
            lines.push("Process cover and art images.");
        }
        if self.transcode {
            lines.push("Transcode audio files.");
        }
        lines
    }
}

/// How manifest keys (and transcoded file names) are derived.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeyStyle {
    /// The source file stem
    #[default]
    Stem,
    /// `<prefix><NNN>` with the 1-based position in the sorted listing
    Sequential { prefix: String },
}

impl KeyStyle {
    /// Returns the key for the file at zero-based `index` with `stem`.
    pub fn key_for(&self, index: usize, stem: &str) -> String {
        match self {
            KeyStyle::Stem => stem.to_string(),
            KeyStyle::Sequential { prefix } => format!("{prefix}{:03}", index + 1),
        }
    }
}

/// Settings for the derived cover and art images.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSettings {
    pub densities: Vec<Density>,
    pub cover_quality: f32,
    pub art_target: u32,
    pub art_quality: f32,
    pub method: i32,
    /// When false, sources smaller than a target keep their own size
    pub allow_upscale: bool,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            densities: COVER_DENSITIES.to_vec(),
            cover_quality: COVER_QUALITY,
            art_target: ART_TARGET,
            art_quality: ART_QUALITY,
            method: WEBP_METHOD,
            allow_upscale: true,
        }
    }
}

/// Transcoder target: mono HE-AAC tuned for speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioEncoderConfig {
    /// ffmpeg encoder name
    pub encoder: String,
    /// Encoder profile (`aac_he` is HE-AAC v1, valid for mono)
    pub profile: String,
    pub bitrate: String,
    pub channels: u32,
    pub sample_rate: u32,
    /// Extension of the transcoded files
    pub container_extension: String,
}

impl Default for AudioEncoderConfig {
    fn default() -> Self {
        Self {
            encoder: "libfdk_aac".to_string(),
            profile: "aac_he".to_string(),
            bitrate: "40k".to_string(),
            channels: 1,
            sample_rate: 44100,
            container_extension: "m4a".to_string(),
        }
    }
}

/// Main configuration structure for the tracksmith-core library.
///
/// # Examples
///
/// ```rust,no_run
/// use tracksmith_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new(PathBuf::from("/path/to/book"))
///     .output_dir(PathBuf::from("/path/to/app"))
///     .manifest(true)
///     .images(true)
///     .build();
/// assert_eq!(config.audio_extension, "mp3");
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory containing the source media
    pub input_dir: PathBuf,

    /// Explicit output directory; `None` writes next to the inputs
    pub output_dir: Option<PathBuf>,

    /// Selected operations
    pub operations: Operations,

    /// Extension of the source audio files, without the dot
    pub audio_extension: String,

    /// Explicit cover file name inside `input_dir`
    pub cover_name: Option<String>,

    /// Explicit art file name inside `input_dir`
    pub art_name: Option<String>,

    /// Manifest key derivation
    pub key_style: KeyStyle,

    /// Minimum width and height for cover and art sources
    pub min_resolution: u32,

    pub images: ImageSettings,

    pub audio: AudioEncoderConfig,
}

impl CoreConfig {
    /// Root of the output tree. Defaults to the input directory.
    pub fn output_root(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(&self.input_dir)
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: None,
            operations: Operations::default(),
            audio_extension: DEFAULT_AUDIO_EXTENSION.to_string(),
            cover_name: None,
            art_name: None,
            key_style: KeyStyle::Stem,
            min_resolution: DEFAULT_MIN_RESOLUTION,
            images: ImageSettings::default(),
            audio: AudioEncoderConfig::default(),
        }
    }
}
