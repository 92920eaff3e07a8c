//! CLI output formatting utilities.

use std::fmt::Display;

use colored::Colorize;

/// Width the labels of [`print_field`] are padded to.
const LABEL_WIDTH: usize = 10;

/// Prints a bold section heading.
pub fn print_heading(title: &str) {
    println!("{}", title.bold());
}

/// Prints a `label  value` line with the label dimmed and aligned.
pub fn print_field(label: &str, value: impl Display) {
    println!("{}  {value}", format_label(label));
}

/// Pads `label` to the field column and dims it.
#[must_use]
pub fn format_label(label: &str) -> String {
    format!("{label:>LABEL_WIDTH$}").dimmed().to_string()
}

/// Prints a success summary line to stderr, keeping stdout for data.
pub fn print_success(message: &str) {
    eprintln!("{} {message}", "✓".green());
}

/// Prints a warning summary line to stderr.
pub fn print_warning(message: &str) {
    eprintln!("{} {message}", "!".yellow().bold());
}
