//! Consistent styling utilities for CLI output.
//!
//! Provides color and formatting helpers using owo-colors. Every helper
//! falls back to plain text when colors are disabled (`--no-color` or
//! `NO_COLOR`).

use owo_colors::OwoColorize;
use std::fmt::Display;

use crate::output;

/// Styles for different semantic elements.
pub struct Style;

impl Style {
    fn paint<T: Display>(text: T, colored: impl FnOnce(&T) -> String) -> String {
        if output::is_no_color() {
            text.to_string()
        } else {
            colored(&text)
        }
    }

    /// Style for section headers (e.g., "Current settings")
    pub fn header<T: Display>(text: T) -> String {
        Self::paint(text, |t| format!("{}", t.bold()))
    }

    /// Style for labels/keys (e.g., "model", "target")
    pub fn label<T: Display>(text: T) -> String {
        Self::paint(text, |t| format!("{}", t.dimmed()))
    }

    /// Style for primary values (e.g., model names)
    pub fn value<T: Display>(text: T) -> String {
        Self::paint(text, |t| format!("{}", t.cyan()))
    }

    /// Style for secondary/supplementary info (e.g., paths, language names)
    pub fn secondary<T: Display>(text: T) -> String {
        Self::paint(text, |t| format!("{}", t.dimmed()))
    }

    /// Style for success messages
    pub fn success<T: Display>(text: T) -> String {
        Self::paint(text, |t| format!("{}", t.green()))
    }

    /// Style for error messages
    pub fn error<T: Display>(text: T) -> String {
        Self::paint(text, |t| format!("{}", t.red().bold()))
    }

    /// Style for language codes
    pub fn code<T: Display>(text: T) -> String {
        Self::paint(text, |t| format!("{}", t.yellow()))
    }

    /// Style for hints/help text
    pub fn hint<T: Display>(text: T) -> String {
        Self::paint(text, |t| format!("{}", t.dimmed().italic()))
    }
}
