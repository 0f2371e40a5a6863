//! Utility functions for formatting sizes and durations.
//!
//! Used by the run summary and by the CLI when reporting results.

/// Formats milliseconds as HH:MM:SS (e.g., 3_725_000 -> "01:02:05").
#[must_use]
pub fn format_duration_millis(millis: u64) -> String {
    let total_seconds = millis / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Formats bytes with appropriate binary units (B, KiB, MiB, GiB).
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    const GIB: f64 = MIB * 1024.0;

    let bytes_f64 = bytes as f64;
    if bytes_f64 >= GIB {
        format!("{:.2} GiB", bytes_f64 / GIB)
    } else if bytes_f64 >= MIB {
        format!("{:.2} MiB", bytes_f64 / MIB)
    } else if bytes_f64 >= KIB {
        format!("{:.2} KiB", bytes_f64 / KIB)
    } else {
        format!("{bytes} B")
    }
}

/// Like [`format_bytes`] but for a size delta that may be negative.
#[must_use]
pub fn format_signed_bytes(delta: i64) -> String {
    let magnitude = format_bytes(delta.unsigned_abs());
    if delta < 0 {
        format!("-{magnitude}")
    } else {
        magnitude
    }
}

/// Percentage of `input_size` removed by transcoding. Returns 0 when the
/// input is empty or the output grew.
#[must_use]
pub fn calculate_size_reduction(input_size: u64, output_size: u64) -> u64 {
    if input_size == 0 || output_size >= input_size {
        return 0;
    }
    (input_size - output_size) * 100 / input_size
}
