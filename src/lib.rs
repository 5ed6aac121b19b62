//! # gtr - Gemini Translation CLI
//!
//! `gtr` translates text piped on stdin, or a whole web page, with the
//! Gemini API and prints the result on stdout.
//!
//! A spinner is drawn on stderr while the request is in flight. It is always
//! erased before the translation or the error message is printed, so stdout
//! stays clean for piping.
//!
//! ## Quick Start
//!
//! ```bash
//! export GTR_API_KEY='your-api-key'
//!
//! # Translate the clipboard to Japanese (the default)
//! pbpaste | gtr
//!
//! # Translate a web page to English
//! gtr --target en https://example.com/article
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/gtr/config.toml`:
//!
//! ```toml
//! [gtr]
//! model = "gemini-2.5-flash"
//! target = "ja"
//! timeout_secs = 120
//! ```

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and resolution.
pub mod config;

/// File system utilities.
pub mod fs;

/// Input reading from stdin or a URL argument.
pub mod input;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Completion service, Gemini client and the spinner-wrapped invoker.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;
