// ============================================================================
// tracksmith-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Provides a fluent API for creating CoreConfig instances. The input
// directory is the only required value and is taken by `new`, so `build`
// cannot fail.

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Internal crate imports ----
use super::{AudioEncoderConfig, CoreConfig, ImageSettings, KeyStyle, Operations};

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use tracksmith_core::config::{CoreConfigBuilder, KeyStyle};
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new(PathBuf::from("/path/to/book"))
///     .manifest(true)
///     .transcode(true)
///     .audio_extension("m4b")
///     .key_style(KeyStyle::Sequential { prefix: "vol1_".into() })
///     .build();
/// assert!(config.operations.transcode);
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfigBuilder {
    input_dir: PathBuf,
    output_dir: Option<PathBuf>,
    operations: Operations,
    audio_extension: String,
    cover_name: Option<String>,
    art_name: Option<String>,
    key_style: KeyStyle,
    min_resolution: u32,
    images: ImageSettings,
    audio: AudioEncoderConfig,
}

impl CoreConfigBuilder {
    /// Creates a new builder for the given input directory with default values.
    pub fn new(input_dir: PathBuf) -> Self {
        let defaults = CoreConfig::default();
        Self {
            input_dir,
            output_dir: None,
            operations: defaults.operations,
            audio_extension: defaults.audio_extension,
            cover_name: None,
            art_name: None,
            key_style: defaults.key_style,
            min_resolution: defaults.min_resolution,
            images: defaults.images,
            audio: defaults.audio,
        }
    }

    /// Sets an explicit output directory (must already exist).
    pub fn output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = Some(output_dir);
        self
    }

    /// Selects the manifest build.
    pub fn manifest(mut self, enabled: bool) -> Self {
        self.operations.manifest = enabled;
        self
    }

    /// Selects cover and art processing.
    pub fn images(mut self, enabled: bool) -> Self {
        self.operations.images = enabled;
        self
    }

    /// Selects audio transcoding.
    pub fn transcode(mut self, enabled: bool) -> Self {
        self.operations.transcode = enabled;
        self
    }

    /// Sets the source audio extension. A leading dot is ignored.
    pub fn audio_extension(mut self, extension: impl AsRef<str>) -> Self {
        self.audio_extension = extension.as_ref().trim_start_matches('.').to_string();
        self
    }

    pub fn cover_name(mut self, name: impl Into<String>) -> Self {
        self.cover_name = Some(name.into());
        self
    }

    pub fn art_name(mut self, name: impl Into<String>) -> Self {
        self.art_name = Some(name.into());
        self
    }

    pub fn key_style(mut self, style: KeyStyle) -> Self {
        self.key_style = style;
        self
    }

    /// Overrides the minimum source resolution.
    pub fn min_resolution(mut self, pixels: u32) -> Self {
        self.min_resolution = pixels;
        self
    }

    /// Controls whether sources smaller than a target are enlarged.
    pub fn allow_upscale(mut self, allow: bool) -> Self {
        self.images.allow_upscale = allow;
        self
    }

    pub fn image_settings(mut self, settings: ImageSettings) -> Self {
        self.images = settings;
        self
    }

    pub fn audio_encoder(mut self, audio: AudioEncoderConfig) -> Self {
        self.audio = audio;
        self
    }

    /// Builds a CoreConfig instance from the builder.
    pub fn build(self) -> CoreConfig {
        CoreConfig {
            input_dir: self.input_dir,
            output_dir: self.output_dir,
            operations: self.operations,
            audio_extension: self.audio_extension,
            cover_name: self.cover_name,
            art_name: self.art_name,
            key_style: self.key_style,
            min_resolution: self.min_resolution,
            images: self.images,
            audio: self.audio,
        }
    }
}
