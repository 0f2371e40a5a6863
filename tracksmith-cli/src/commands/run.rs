//! Implementation of the packaging run.
//!
//! Turns the parsed arguments into a `CoreConfig`, prints the work order,
//! runs the core pipeline with a transcode progress bar and prints the
//! summary.

use crate::cli::Cli;
use crate::error::{CliErrorContext, CliResult};
use crate::output::{print_heading, print_info, print_item, print_section, print_success, print_warning};
use crate::progress::TranscodeProgress;

use tracksmith_core::config::{CoreConfig, CoreConfigBuilder};
use tracksmith_core::pipeline::run_default;
use tracksmith_core::{
    RunSummary, TranscodeSummary, calculate_size_reduction, format_bytes, format_duration_millis,
    format_signed_bytes,
};

use log::debug;

/// Builds the core configuration from the command line.
pub fn build_config(args: &Cli) -> CoreConfig {
    let mut builder = CoreConfigBuilder::new(args.input_dir.clone())
        .manifest(args.json)
        .images(args.images)
        .transcode(args.transcode)
        .audio_extension(&args.audio_extension)
        .key_style(args.key_style())
        .allow_upscale(!args.no_upscale);

    if let Some(output_dir) = &args.output_dir {
        builder = builder.output_dir(output_dir.clone());
    }
    if let Some(cover) = &args.cover {
        builder = builder.cover_name(cover.clone());
    }
    if let Some(art) = &args.art {
        builder = builder.art_name(art.clone());
    }
    builder.build()
}

/// Prints what the run is about to do.
pub fn print_work_order(config: &CoreConfig) {
    print_heading("Tracksmith");
    print_info("Input", config.input_dir.display());
    print_info("Output", config.output_root().display());
    print_info("Audio", format!(".{}", config.audio_extension));

    print_section("Work order");
    let operations = config.operations.describe();
    if operations.is_empty() {
        print_item("(nothing selected)");
    }
    for operation in operations {
        print_item(operation);
    }
}

/// "1.50 MiB (75%)": the signed delta and the share of the input removed.
fn bytes_saved_line(transcode: &TranscodeSummary) -> String {
    let original: u64 = transcode.outputs.iter().map(|o| o.original_size).sum();
    let transcoded: u64 = transcode.outputs.iter().map(|o| o.transcoded_size).sum();
    format!(
        "{} ({}%)",
        format_signed_bytes(transcode.bytes_saved),
        calculate_size_reduction(original, transcoded)
    )
}

/// Prints what the run produced.
pub fn print_summary(summary: &RunSummary) -> CliResult<()> {
    print_section("Summary");

    for warning in &summary.warnings {
        print_warning(&warning.to_string());
    }

    if let Some(manifest) = &summary.manifest_path {
        let size = std::fs::metadata(manifest)
            .cli_with_context(|| format!("Failed to read {}", manifest.display()))?
            .len();
        print_info("Tracks", summary.tracks);
        print_info("Duration", format_duration_millis(summary.total_duration_ms));
        print_info("Manifest", format!("{} ({})", manifest.display(), format_bytes(size)));
    }

    if !summary.images.is_empty() {
        print_info("Images", format!("{} written", summary.images.len()));
        for image in &summary.images {
            debug!("{} {}x{} {}", image.label, image.width, image.height, image.path.display());
        }
    }

    if let Some(transcode) = &summary.transcode {
        print_info("Transcoded", format!("{} file(s)", transcode.outputs.len()));
        print_info("Bytes saved", bytes_saved_line(transcode));
    }

    print_success("All selected operations completed.");
    Ok(())
}

/// Runs the packaging pipeline for `args`.
pub fn run_package(args: &Cli) -> CliResult<RunSummary> {
    let config = build_config(args);
    debug!("Configuration: {:?}", config);
    print_work_order(&config);

    let mut progress = TranscodeProgress::new();
    let result = run_default(&config, |index, total, file| {
        progress.update(index, total, file)
    });
    progress.finish();

    let summary = result?;
    print_summary(&summary)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;
    use tracksmith_core::KeyStyle;

    #[test]
    fn test_build_config_from_flags() {
        let args = Cli::try_parse_from([
            "tracksmith", "/book", "-o", "/app", "-t", "-f", ".M4B", "-a", "square.png", "-p",
            "bk_", "--no-upscale",
        ])
        .unwrap();
        let config = build_config(&args);

        assert_eq!(config.input_dir, PathBuf::from("/book"));
        assert_eq!(config.output_root(), PathBuf::from("/app"));
        assert!(config.operations.transcode);
        assert!(!config.operations.manifest && !config.operations.images);
        assert_eq!(config.audio_extension, "M4B");
        assert_eq!(config.art_name.as_deref(), Some("square.png"));
        assert_eq!(config.cover_name, None);
        assert_eq!(config.key_style, KeyStyle::Sequential { prefix: "bk_".into() });
        assert!(!config.images.allow_upscale);
    }

    #[test]
    fn test_bytes_saved_line_reports_reduction() {
        use tracksmith_core::TranscodeOutput;

        let output = |original_size, transcoded_size| TranscodeOutput {
            source: PathBuf::from("/book/a.mp3"),
            dest: PathBuf::from("/app/assets/a.m4a"),
            original_size,
            transcoded_size,
        };
        let summary = TranscodeSummary {
            outputs: vec![output(3072, 1024), output(1024, 0)],
            bytes_saved: 3072,
        };
        assert_eq!(bytes_saved_line(&summary), "3.00 KiB (75%)");

        let grew = TranscodeSummary {
            outputs: vec![output(1024, 2048)],
            bytes_saved: -1024,
        };
        assert_eq!(bytes_saved_line(&grew), "-1.00 KiB (0%)");
    }

    #[test]
    fn test_output_defaults_to_input() {
        let args = Cli::try_parse_from(["tracksmith", "/book", "-j"]).unwrap();
        let config = build_config(&args);
        assert_eq!(config.output_dir, None);
        assert_eq!(config.output_root(), PathBuf::from("/book"));
    }
}
