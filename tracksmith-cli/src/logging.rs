// ============================================================================
// tracksmith-cli/src/logging.rs
// ============================================================================
//
// LOGGING: env_logger setup for the tracksmith binary
//
// Log lines go to stderr as "<timestamp> <LEVEL> <message>". The level is
// Info by default and Debug with --verbose; RUST_LOG, when set, overrides
// both (e.g. RUST_LOG=tracksmith_core=trace).

use log::LevelFilter;
use owo_colors::OwoColorize;
use std::io::Write;

/// Returns the current local time formatted as "YYYY-MM-DD HH:MM:SS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Level used when RUST_LOG is not set.
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes the global logger.
pub fn init(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(default_level(verbose));
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    builder
        .format(|buf, record| {
            let level = match record.level() {
                log::Level::Error => "ERROR".bright_red().to_string(),
                log::Level::Warn => "WARN ".yellow().to_string(),
                log::Level::Info => "INFO ".green().to_string(),
                log::Level::Debug => "DEBUG".blue().to_string(),
                log::Level::Trace => "TRACE".magenta().to_string(),
            };
            writeln!(
                buf,
                "{} {} {}",
                get_timestamp().dimmed(),
                level,
                record.args()
            )
        })
        .init();

    log::debug!("Logger initialized with level: {}", default_level(verbose));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_shape() {
        let ts = get_timestamp();
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], " ");
    }

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(true), LevelFilter::Debug);
        assert_eq!(default_level(false), LevelFilter::Info);
    }
}
