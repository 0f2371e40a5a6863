// ============================================================================
// tracksmith-core/src/images/mod.rs
// ============================================================================
//
// IMAGE DERIVATION: Cover densities and the square art image
//
// Sources are decoded with the `image` crate, resampled with Lanczos3 and
// encoded as lossy WebP through libwebp (the `webp` crate), which exposes
// the quality and method settings.
//
// - process_cover: one WebP per display density, aspect ratio preserved
// - process_art: a single square WebP
//
// Outputs are overwritten on every run.

use crate::config::{Density, ImageSettings};
use crate::error::{CoreError, CoreResult};
use crate::layout::OutputLayout;

use image::DynamicImage;
use image::imageops::FilterType;
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

pub mod calculations;

pub use calculations::{needs_upscale, target_dimensions};

/// Which source image is being handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRole {
    Cover,
    Art,
}

impl Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageRole::Cover => write!(f, "cover"),
            ImageRole::Art => write!(f, "art"),
        }
    }
}

/// One written image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    /// Density label ("1.0x" .. "2.5x") or "art"
    pub label: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Decodes `path`, guessing the format from its contents.
pub fn load_image(path: &Path) -> CoreResult<DynamicImage> {
    let reader = image::ImageReader::open(path)?.with_guessed_format()?;
    reader.decode().map_err(|source| CoreError::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// Resamples `img` so its longer side is `target`.
pub fn resize_to_target(img: &DynamicImage, target: u32, allow_upscale: bool) -> DynamicImage {
    let (width, height) = target_dimensions(img.width(), img.height(), target, allow_upscale);
    if (width, height) == (img.width(), img.height()) {
        return img.clone();
    }
    img.resize_exact(width, height, FilterType::Lanczos3)
}

/// Encodes `img` as lossy WebP and writes it to `dest`.
pub fn encode_webp(img: &DynamicImage, quality: f32, method: i32, dest: &Path) -> CoreResult<()> {
    let encode_error = |reason: String| CoreError::ImageEncode {
        path: dest.to_path_buf(),
        reason,
    };

    let mut config = webp::WebPConfig::new()
        .map_err(|_| encode_error("libwebp rejected the default configuration".to_string()))?;
    config.quality = quality;
    config.method = method;

    let (width, height) = (img.width(), img.height());
    let memory = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        webp::Encoder::from_rgba(rgba.as_raw(), width, height).encode_advanced(&config)
    } else {
        let rgb = img.to_rgb8();
        webp::Encoder::from_rgb(rgb.as_raw(), width, height).encode_advanced(&config)
    }
    .map_err(|e| encode_error(format!("{e:?}")))?;

    std::fs::write(dest, &*memory)?;
    Ok(())
}

fn write_density(
    source: &DynamicImage,
    density: &Density,
    layout: &OutputLayout,
    settings: &ImageSettings,
) -> CoreResult<ImageAsset> {
    let resized = resize_to_target(source, density.max_dimension, settings.allow_upscale);
    let path = layout.cover_path(density);
    encode_webp(&resized, settings.cover_quality, settings.method, &path)?;

    log::debug!(
        "cover {} -> {}x{} {}",
        density.label,
        resized.width(),
        resized.height(),
        path.display()
    );
    Ok(ImageAsset {
        label: density.label.to_string(),
        path,
        width: resized.width(),
        height: resized.height(),
    })
}

/// Writes the cover at every configured density.
///
/// The source is decoded once; each density is resampled from the
/// original, never from a smaller derivative.
pub fn process_cover(
    cover: &Path,
    layout: &OutputLayout,
    settings: &ImageSettings,
) -> CoreResult<Vec<ImageAsset>> {
    let source = load_image(cover)?;
    log::info!(
        "Processing cover {} ({}x{})",
        cover.display(),
        source.width(),
        source.height()
    );

    settings
        .densities
        .iter()
        .map(|density| write_density(&source, density, layout, settings))
        .collect()
}

/// Writes the square art image.
pub fn process_art(
    art: &Path,
    layout: &OutputLayout,
    settings: &ImageSettings,
) -> CoreResult<ImageAsset> {
    let source = load_image(art)?;
    log::info!(
        "Processing art {} ({}x{})",
        art.display(),
        source.width(),
        source.height()
    );

    let resized = resize_to_target(&source, settings.art_target, settings.allow_upscale);
    let path = layout.art_path();
    encode_webp(&resized, settings.art_quality, settings.method, &path)?;

    Ok(ImageAsset {
        label: "art".to_string(),
        path,
        width: resized.width(),
        height: resized.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ensure_layout;
    use image::{ImageFormat, Rgb, RgbImage};
    use tempfile::tempdir;

    fn write_jpeg(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        img.save_with_format(path, ImageFormat::Jpeg).unwrap();
    }

    #[test]
    fn test_process_cover_writes_every_density() {
        let dir = tempdir().unwrap();
        let cover = dir.path().join("cover.jpg");
        write_jpeg(&cover, 1600, 1200);
        let layout = ensure_layout(&dir.path().join("out")).unwrap();

        let assets = process_cover(&cover, &layout, &ImageSettings::default()).unwrap();
        let sizes: Vec<(u32, u32)> = assets.iter().map(|a| (a.width, a.height)).collect();
        assert_eq!(sizes, vec![(400, 300), (600, 450), (800, 600), (1024, 768)]);

        for asset in &assets {
            let decoded = image::open(&asset.path).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (asset.width, asset.height));
        }
        assert_eq!(assets[0].path, layout.images_dir().join("cover.webp"));
    }

    #[test]
    fn test_process_art_is_square_webp() {
        let dir = tempdir().unwrap();
        let art = dir.path().join("art.jpg");
        write_jpeg(&art, 1200, 1200);
        let layout = ensure_layout(dir.path()).unwrap();

        let asset = process_art(&art, &layout, &ImageSettings::default()).unwrap();
        assert_eq!((asset.width, asset.height), (640, 640));

        let bytes = std::fs::read(layout.art_path()).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::WebP);
    }

    #[test]
    fn test_load_image_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cover.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();
        assert!(matches!(
            load_image(&path),
            Err(CoreError::Image { .. })
        ));
    }
}
