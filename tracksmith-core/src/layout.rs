//! Canonical output tree.
//!
//! ```text
//! <root>/tracks.json
//! <root>/assets/<key>.m4a
//! <root>/assets/images/cover.webp
//! <root>/assets/images/{1.5x,2.0x,2.5x}/cover.webp
//! <root>/assets/images/art.webp
//! ```

use crate::config::{COVER_DENSITIES, Density, MANIFEST_FILENAME};
use crate::error::CoreResult;

use std::path::{Path, PathBuf};

const ASSETS_DIR: &str = "assets";
const IMAGES_DIR: &str = "images";
const COVER_FILE: &str = "cover.webp";
const ART_FILE: &str = "art.webp";

/// Every path the pipeline may write, derived from one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.root.join(ASSETS_DIR)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.assets_dir().join(IMAGES_DIR)
    }

    /// Directory holding the cover of `density`.
    pub fn density_dir(&self, density: &Density) -> PathBuf {
        match density.subdir() {
            Some(sub) => self.images_dir().join(sub),
            None => self.images_dir(),
        }
    }

    pub fn cover_path(&self, density: &Density) -> PathBuf {
        self.density_dir(density).join(COVER_FILE)
    }

    pub fn art_path(&self) -> PathBuf {
        self.images_dir().join(ART_FILE)
    }

    /// Transcoded audio for manifest key `key`.
    pub fn audio_path(&self, key: &str, extension: &str) -> PathBuf {
        self.assets_dir().join(format!("{key}.{extension}"))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILENAME)
    }

    /// Creates the asset directories that are missing. Existing
    /// directories and their contents are left alone.
    pub fn ensure(&self) -> CoreResult<()> {
        std::fs::create_dir_all(self.images_dir())?;
        for density in &COVER_DENSITIES {
            std::fs::create_dir_all(self.density_dir(density))?;
        }
        log::debug!("Output layout ready under {}", self.assets_dir().display());
        Ok(())
    }
}

/// Creates the output tree under `root` and returns its layout.
pub fn ensure_layout(root: &Path) -> CoreResult<OutputLayout> {
    let layout = OutputLayout::new(root);
    layout.ensure()?;
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_paths() {
        let layout = OutputLayout::new("/app");
        assert_eq!(
            layout.cover_path(&COVER_DENSITIES[0]),
            PathBuf::from("/app/assets/images/cover.webp")
        );
        assert_eq!(
            layout.cover_path(&COVER_DENSITIES[2]),
            PathBuf::from("/app/assets/images/2.0x/cover.webp")
        );
        assert_eq!(layout.art_path(), PathBuf::from("/app/assets/images/art.webp"));
        assert_eq!(
            layout.audio_path("ch_01", "m4a"),
            PathBuf::from("/app/assets/ch_01.m4a")
        );
        assert_eq!(layout.manifest_path(), PathBuf::from("/app/tracks.json"));
    }

    #[test]
    fn test_ensure_layout_is_idempotent() {
        let dir = tempdir().unwrap();
        let layout = ensure_layout(dir.path()).unwrap();
        let keep = layout.images_dir().join("1.5x").join("keep.txt");
        std::fs::write(&keep, "x").unwrap();

        ensure_layout(dir.path()).unwrap();
        assert!(keep.exists());
        for sub in ["1.5x", "2.0x", "2.5x"] {
            assert!(layout.images_dir().join(sub).is_dir());
        }
        assert!(!layout.images_dir().join("1.0x").exists());
    }
}
