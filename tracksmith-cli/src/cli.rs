// tracksmith-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::Parser;
use std::path::PathBuf;
use tracksmith_core::KeyStyle;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Tracksmith: audio book asset packager",
    long_about = "Validates a directory of audio tracks, cover and art images, then builds \
                  the tracks.json manifest, WebP cover densities and transcoded audio."
)]
pub struct Cli {
    /// Directory containing the audio files, cover and art
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory that receives tracks.json and assets/ (defaults to INPUT_DIR)
    #[arg(short, long = "output", value_name = "OUTPUT_DIR", env = "TRACKSMITH_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    // --- Operations ---
    /// Build the tracks.json manifest
    #[arg(short = 'j', long = "json")]
    pub json: bool,

    /// Derive the WebP cover densities and art image
    #[arg(short, long)]
    pub images: bool,

    /// Transcode the audio files with ffmpeg
    #[arg(short, long)]
    pub transcode: bool,

    // --- Inputs ---
    /// Extension of the source audio files
    #[arg(short = 'f', long = "format", value_name = "EXT", default_value = "mp3")]
    pub audio_extension: String,

    /// Cover file name inside INPUT_DIR (default: cover.jpg)
    #[arg(short, long, value_name = "FILE")]
    pub cover: Option<String>,

    /// Art file name inside INPUT_DIR (default: art.jpg)
    #[arg(short, long, value_name = "FILE")]
    pub art: Option<String>,

    // --- Naming ---
    /// Prefix for sequential manifest keys; implies --sequential-keys
    #[arg(short = 'p', long = "prefix", value_name = "PREFIX")]
    pub key_prefix: Option<String>,

    /// Key tracks as <PREFIX>001, <PREFIX>002, ... instead of by file stem
    #[arg(long)]
    pub sequential_keys: bool,

    /// Keep images smaller than a target at their source size
    #[arg(long)]
    pub no_upscale: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Key style selected by `--sequential-keys` / `--prefix`.
    pub fn key_style(&self) -> KeyStyle {
        if self.sequential_keys || self.key_prefix.is_some() {
            KeyStyle::Sequential {
                prefix: self.key_prefix.clone().unwrap_or_default(),
            }
        } else {
            KeyStyle::Stem
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "tracksmith", "/book", "-o", "/app", "-j", "-i", "-t", "-f", "m4b", "-c", "front.png",
        ])
        .unwrap();
        assert_eq!(cli.input_dir, PathBuf::from("/book"));
        assert_eq!(cli.output_dir, Some(PathBuf::from("/app")));
        assert!(cli.json && cli.images && cli.transcode);
        assert_eq!(cli.audio_extension, "m4b");
        assert_eq!(cli.cover.as_deref(), Some("front.png"));
        assert_eq!(cli.art, None);
        assert_eq!(cli.key_style(), KeyStyle::Stem);
    }

    #[test]
    fn test_key_style_flags() {
        let cli = Cli::try_parse_from(["tracksmith", "/book", "--sequential-keys"]).unwrap();
        assert_eq!(cli.key_style(), KeyStyle::Sequential { prefix: String::new() });

        let cli = Cli::try_parse_from(["tracksmith", "/book", "-p", "bk_"]).unwrap();
        assert_eq!(cli.key_style(), KeyStyle::Sequential { prefix: "bk_".into() });
    }

    #[test]
    fn test_input_dir_required() {
        assert!(Cli::try_parse_from(["tracksmith", "-j"]).is_err());
    }
}
