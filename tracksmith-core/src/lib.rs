//! Core library for packaging an audio book directory into player assets.
//!
//! This crate validates the source media, extracts per-track metadata into
//! an ordered `tracks.json` manifest, derives multi-density WebP cover
//! images and a square art image, and transcodes the audio with ffmpeg.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use tracksmith_core::config::CoreConfigBuilder;
//! use tracksmith_core::pipeline::run_default;
//! use std::path::PathBuf;
//!
//! let config = CoreConfigBuilder::new(PathBuf::from("/path/to/book"))
//!     .output_dir(PathBuf::from("/path/to/app"))
//!     .manifest(true)
//!     .images(true)
//!     .transcode(true)
//!     .build();
//!
//! let summary = run_default(&config, |index, total, file| {
//!     println!("[{}/{}] {}", index + 1, total, file.display());
//! })
//! .unwrap();
//! println!("{} track(s) written", summary.tracks);
//! ```

pub mod audio;
pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod images;
pub mod layout;
pub mod manifest;
pub mod metadata;
pub mod pipeline;
pub mod utils;
pub mod validation;

// Re-exports for public API
pub use audio::{TranscodeOutput, TranscodeSummary, transcode, transcode_all};
pub use config::{CoreConfig, CoreConfigBuilder, KeyStyle, Operations};
pub use discovery::find_audio_files;
pub use error::{CoreError, CoreResult};
pub use images::{ImageAsset, ImageRole, process_art, process_cover, target_dimensions};
pub use layout::{OutputLayout, ensure_layout};
pub use manifest::{Manifest, write_manifest};
pub use metadata::{TrackRecord, duration_millis, extract_all, extract_one};
pub use pipeline::{RunSummary, run, run_default};
pub use utils::{calculate_size_reduction, format_bytes, format_duration_millis, format_signed_bytes};
pub use validation::{ValidationIssue, ValidationReport, validate};
