//! Consistent styling utilities for CLI output.
//!
//! Provides color and formatting helpers using owo-colors. Every helper
//! falls back to plain text when colors are disabled.

use owo_colors::OwoColorize;
use std::fmt::Display;

use crate::output;

/// Styles for different semantic elements.
pub struct Style;

impl Style {
    /// Style for section headers (e.g., "Current configuration", "Summary")
    pub fn header<T: Display>(text: T) -> String {
        paint(text, |t| format!("{}", t.bold()))
    }

    /// Style for labels/keys (e.g., "from", "app_id")
    pub fn label<T: Display>(text: T) -> String {
        paint(text, |t| format!("{}", t.dimmed()))
    }

    /// Style for primary values (e.g., language codes in settings, file names)
    pub fn value<T: Display>(text: T) -> String {
        paint(text, |t| format!("{}", t.cyan()))
    }

    /// Style for secondary/supplementary info (e.g., paths, descriptions)
    pub fn secondary<T: Display>(text: T) -> String {
        paint(text, |t| format!("{}", t.dimmed()))
    }

    /// Style for success messages
    pub fn success<T: Display>(text: T) -> String {
        paint(text, |t| format!("{}", t.green()))
    }

    /// Style for error messages
    pub fn error<T: Display>(text: T) -> String {
        paint(text, |t| format!("{}", t.red().bold()))
    }

    /// Style for warning messages
    pub fn warning<T: Display>(text: T) -> String {
        paint(text, |t| format!("{}", t.yellow()))
    }

    /// Style for language codes
    pub fn code<T: Display>(text: T) -> String {
        paint(text, |t| format!("{}", t.yellow()))
    }

    /// Style for original Chinese spans
    pub fn source<T: Display>(text: T) -> String {
        paint(text, |t| format!("{}", t.magenta()))
    }

    /// Style for line numbers
    pub fn line_number(line_no: usize) -> String {
        paint(format!("[{line_no}]"), |t| format!("{}", t.dimmed()))
    }
}

fn paint<T: Display>(text: T, styled: impl FnOnce(&T) -> String) -> String {
    if output::is_no_color() {
        text.to_string()
    } else {
        styled(&text)
    }
}
