use std::io::{self, Write};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Glyphs drawn by the indicator, in order.
const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Delay between two redraws.
const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

/// Number of blanks written over the last glyph on stop.
const ERASE_WIDTH: usize = 30;

/// Shared handle to the diagnostic stream (stderr in the CLI).
///
/// Writes are best-effort: a closed or broken stream is silently ignored,
/// since everything written here is cosmetic.
#[derive(Clone)]
pub struct DiagnosticSink {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl DiagnosticSink {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Writes `text` and flushes, ignoring any I/O error.
    pub fn write_best_effort(&self, text: &str) {
        // A poisoned lock only means a redraw thread panicked mid-write
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writer.write_all(text.as_bytes());
        let _ = writer.flush();
    }
}

struct Redraw {
    stop_tx: Sender<()>,
    handle: JoinHandle<usize>,
}

/// A terminal spinner drawn by a background thread while the caller blocks.
///
/// `start` spawns the redraw loop, `stop` signals it, joins it and erases the
/// last glyph. Every glyph write happens before `stop` returns. Dropping a
/// running indicator stops it.
pub struct Indicator {
    sink: Option<DiagnosticSink>,
    interval: Duration,
    frame: usize,
    redraw: Option<Redraw>,
}

impl Indicator {
    /// Creates a stopped indicator drawing to `sink`.
    pub const fn new(sink: DiagnosticSink) -> Self {
        Self {
            sink: Some(sink),
            interval: DEFAULT_INTERVAL,
            frame: 0,
            redraw: None,
        }
    }

    pub fn stderr() -> Self {
        Self::new(DiagnosticSink::stderr())
    }

    /// An indicator that never draws (quiet mode, non-terminal stderr).
    pub const fn disabled() -> Self {
        Self {
            sink: None,
            interval: DEFAULT_INTERVAL,
            frame: 0,
            redraw: None,
        }
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Returns a new, stopped indicator sharing this one's sink and interval.
    #[must_use]
    pub fn fresh(&self) -> Self {
        Self {
            sink: self.sink.clone(),
            interval: self.interval,
            frame: 0,
            redraw: None,
        }
    }

    pub const fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub const fn is_running(&self) -> bool {
        self.redraw.is_some()
    }

    /// Number of frames drawn by the last completed run.
    pub const fn frames_drawn(&self) -> usize {
        self.frame
    }

    /// Starts the redraw loop. Does nothing if disabled or already running.
    pub fn start(&mut self) {
        if self.redraw.is_some() {
            return;
        }
        let Some(sink) = self.sink.clone() else {
            return;
        };

        // A fresh channel per run clears any earlier stop request
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let interval = self.interval;

        let spawned = thread::Builder::new()
            .name("gtr-indicator".to_string())
            .spawn(move || {
                let mut frame = 0;
                loop {
                    sink.write_best_effort(&format!("\r{}  ", FRAMES[frame % FRAMES.len()]));
                    frame += 1;
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                frame
            });

        // Failing to spawn only costs the animation
        if let Ok(handle) = spawned {
            self.frame = 0;
            self.redraw = Some(Redraw { stop_tx, handle });
        }
    }

    /// Stops the redraw loop and erases the spinner line.
    ///
    /// Returns immediately without writing if the indicator is not running.
    pub fn stop(&mut self) {
        let Some(redraw) = self.redraw.take() else {
            return;
        };

        let _ = redraw.stop_tx.send(());
        if let Ok(frames) = redraw.handle.join() {
            self.frame = frames;
        }

        if let Some(sink) = &self.sink {
            sink.write_best_effort(&format!("\r{}\r", " ".repeat(ERASE_WIDTH)));
        }
    }
}

impl Drop for Indicator {
    fn drop(&mut self) {
        self.stop();
    }
}
