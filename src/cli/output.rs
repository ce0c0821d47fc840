//! Operator-facing console output.
//!
//! All human-readable progress text goes through [`OutputManager`], which
//! writes either to stdout (colored when the terminal supports it) or to an
//! in-memory buffer so tests can assert on exactly what an operator would see.

use owo_colors::{OwoColorize, Stream};
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Status symbols prefixed to output lines.
pub mod symbols {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const INFO: &str = "•";
    pub const ARROW: &str = "→";
}

/// Indentation for item lines under a progress step.
const INDENT: &str = "   ";

#[derive(Clone, Copy)]
enum Tone {
    Green,
    Red,
    Yellow,
    Blue,
    Bold,
}

#[derive(Clone, Debug)]
enum Sink {
    Stdout,
    Capture(Arc<Mutex<Vec<u8>>>),
}

/// Console sink shared by every pipeline stage.
///
/// Cloning is cheap; clones write to the same sink. Write failures (closed
/// stdout, poisoned capture buffer) are dropped rather than aborting a build.
#[derive(Clone, Debug)]
pub struct OutputManager {
    sink: Sink,
}

impl Default for OutputManager {
    fn default() -> Self {
        Self::stdout()
    }
}

impl OutputManager {
    /// Output manager writing to the process stdout.
    pub fn stdout() -> Self {
        Self { sink: Sink::Stdout }
    }

    /// Output manager recording everything into memory, without colors.
    pub fn capture() -> Self {
        Self {
            sink: Sink::Capture(Arc::new(Mutex::new(Vec::new()))),
        }
    }

    /// Everything written so far to a capturing manager.
    ///
    /// Always empty for [`OutputManager::stdout`].
    pub fn captured(&self) -> String {
        match &self.sink {
            Sink::Stdout => String::new(),
            Sink::Capture(buffer) => buffer
                .lock()
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                .unwrap_or_default(),
        }
    }

    /// Print a plain line.
    pub fn println(&self, message: &str) {
        match &self.sink {
            Sink::Stdout => {
                let _ = writeln!(std::io::stdout().lock(), "{message}");
            }
            Sink::Capture(buffer) => {
                if let Ok(mut bytes) = buffer.lock() {
                    let _ = writeln!(bytes, "{message}");
                }
            }
        }
    }

    /// Print an empty line.
    pub fn blank(&self) {
        self.println("");
    }

    /// Print a section header.
    pub fn section(&self, title: &str) {
        let header = format!("=== {title} ===");
        self.println(&self.paint(&header, Tone::Bold));
    }

    /// Print a top-level progress step.
    pub fn progress(&self, message: &str) {
        self.println(&format!("{} {}", self.paint(symbols::INFO, Tone::Blue), message));
    }

    /// Print a success item.
    pub fn success(&self, message: &str) {
        self.item(symbols::SUCCESS, Tone::Green, message);
    }

    /// Print a warning item.
    pub fn warn(&self, message: &str) {
        self.item(symbols::WARNING, Tone::Yellow, message);
    }

    /// Print an error item.
    pub fn error(&self, message: &str) {
        self.item(symbols::ERROR, Tone::Red, message);
    }

    /// Print a remediation hint.
    pub fn hint(&self, message: &str) {
        self.item(symbols::ARROW, Tone::Blue, message);
    }

    /// Print indented text.
    pub fn indent(&self, message: &str) {
        self.println(&format!("{INDENT}{message}"));
    }

    fn item(&self, symbol: &str, tone: Tone, message: &str) {
        self.println(&format!("{INDENT}{} {}", self.paint(symbol, tone), message));
    }

    fn paint(&self, text: &str, tone: Tone) -> String {
        if matches!(self.sink, Sink::Capture(_)) {
            return text.to_string();
        }
        match tone {
            Tone::Green => text.if_supports_color(Stream::Stdout, |s| s.green()).to_string(),
            Tone::Red => text.if_supports_color(Stream::Stdout, |s| s.red()).to_string(),
            Tone::Yellow => text.if_supports_color(Stream::Stdout, |s| s.yellow()).to_string(),
            Tone::Blue => text.if_supports_color(Stream::Stdout, |s| s.blue()).to_string(),
            Tone::Bold => text.if_supports_color(Stream::Stdout, |s| s.bold()).to_string(),
        }
    }
}
