//! Terminal output helpers for the work order, validation issues and the
//! run summary.

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Print a heading with colored styling and clear separation
pub fn print_heading(text: &str) {
    println!("\n{}", "=".repeat(50).bright_blue());
    println!("{}", format!(" {} ", text).bold().bright_white());
    println!("{}\n", "=".repeat(50).bright_blue());
}

/// Print a section heading (smaller than main heading)
pub fn print_section(text: &str) {
    println!("\n{}", format!(" {} ", text).bold().white());
    println!("{}", "-".repeat(40).blue());
}

/// Print an info line with label and value, with the label colored
pub fn print_info<T: Display>(label: &str, value: T) {
    println!("  {:<14} {}", format!("{label}:").bright_cyan(), value);
}

/// Print a bulleted line
pub fn print_item<T: Display>(value: T) {
    println!("  {} {}", "-".bright_blue(), value);
}

/// Print an error message with red styling
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".bold().bright_red(), message);
}

/// Print a warning message with yellow styling
pub fn print_warning(message: &str) {
    println!("{} {}", "Warning:".bold().yellow(), message.yellow());
}

/// Print a success message with green styling
pub fn print_success(message: &str) {
    println!("{} {}", "Done:".bold().green(), message);
}
