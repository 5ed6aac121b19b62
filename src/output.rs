//! Global output configuration and utilities.
//!
//! This module provides centralized control over CLI output behavior,
//! including quiet mode, color support, and stderr/stdout routing.
//!
//! ## Design Principles
//!
//! - Translation output goes to stdout (for piping)
//! - The spinner, status messages and errors go to stderr
//! - Quiet mode suppresses non-essential output, including the spinner
//! - Colors can be disabled via flag or NO_COLOR environment variable

use std::io::{self, IsTerminal, Write};
use std::sync::OnceLock;

use crate::ui::Indicator;

/// Global output configuration.
static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

/// Output configuration settings.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Disable colored output.
    pub no_color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            // Check NO_COLOR environment variable (https://no-color.org/)
            no_color: std::env::var("NO_COLOR").is_ok(),
        }
    }
}

/// Initialize the global output configuration.
///
/// This should be called once at startup with the CLI flags.
/// If called multiple times, subsequent calls are ignored.
pub fn init(config: OutputConfig) {
    let _ = OUTPUT_CONFIG.set(config);
}

/// Get the current output configuration.
pub fn config() -> &'static OutputConfig {
    OUTPUT_CONFIG.get_or_init(OutputConfig::default)
}

/// Check if quiet mode is enabled.
pub fn is_quiet() -> bool {
    config().quiet
}

/// Check if colors are disabled.
pub fn is_no_color() -> bool {
    config().no_color
}

/// Whether the spinner should be drawn for the given settings.
///
/// Drawing into a pipe or a log file only produces noise.
pub const fn should_animate(quiet: bool, stderr_is_terminal: bool) -> bool {
    !quiet && stderr_is_terminal
}

/// Builds the indicator used around API calls.
pub fn indicator() -> Indicator {
    if should_animate(is_quiet(), io::stderr().is_terminal()) {
        Indicator::stderr()
    } else {
        Indicator::disabled()
    }
}

/// Print a status message to stderr (respects quiet mode).
///
/// Use this for informational messages that should not reach stdout.
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}

/// Joins the words of `message` with single spaces and cuts the result to
/// `max_chars` characters, marking a cut with `…`.
pub fn single_line(message: &str, max_chars: usize) -> String {
    let flat = message.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }

    let mut cut: String = flat.chars().take(max_chars).collect();
    cut.truncate(cut.trim_end().len());
    cut.push('…');
    cut
}

/// Writes the single error line reported for a failed run.
///
/// Multi-line messages (configuration hints) are kept as-is; everything is
/// terminated by exactly one newline.
pub fn report_error<W: Write>(writer: &mut W, message: &str) -> io::Result<()> {
    writeln!(writer, "{}", message.trim_end())?;
    writer.flush()
}
