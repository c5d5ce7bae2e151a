/// Output helpers: JSON printing, structured error output, and debug timing.
use std::io::{IsTerminal, Write};

use serde::Serialize;

use crate::types::ErrorOutput;

/// Output context passed to every command.
pub struct OutputCtx {
    /// Print results as JSON instead of text, and errors as a JSON envelope.
    pub json: bool,
    /// Whether the progress indicator may be shown at all.
    pub progress: bool,
    /// When true, timers log their elapsed time.
    pub debug: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(json: bool, progress: bool, debug: bool) -> Self {
        Self {
            json,
            progress,
            debug,
        }
    }

    /// Whether to animate the progress indicator for this run: only for text
    /// output on an interactive stderr.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.progress && !self.json && std::io::stderr().is_terminal()
    }

    /// Start a named debug timer. Logs elapsed time on drop only when `--debug` is set.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label, self.debug)
    }
}

/// Serialize `value` as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns an I/O error if writing fails or the value cannot be serialized.
pub fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(std::io::Error::from)?;
    writeln!(out)
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, ctx: &OutputCtx) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    if ctx.json {
        let s = serde_json::to_string_pretty(err).unwrap_or_default();
        let _ = writeln!(out, "{s}");
    } else {
        let _ = writeln!(out, "Error: {}", err.error.message.trim_end());
    }
}

// --- Debug timer ---

/// A RAII timer that logs elapsed milliseconds on drop.
///
/// Created via [`OutputCtx::timer`]. Does nothing when `debug` is false.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
    active: bool,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str, active: bool) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
            active,
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        if self.active {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            tracing::debug!(label = self.label, "{ms:.2}ms");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_json_appends_newline() {
        let mut buf = Vec::new();
        write_json(&mut buf, &["a", "b"]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[\n  \"a\",\n  \"b\"\n]\n");
    }

    #[test]
    fn test_json_output_never_animates() {
        let ctx = OutputCtx::new(true, true, false);
        assert!(!ctx.show_progress());
        let ctx = OutputCtx::new(false, false, false);
        assert!(!ctx.show_progress());
    }
}
