//! Cosmetic progress indicator.
//!
//! A worker thread cycles through a few frames on stderr while the calling
//! thread blocks on a controller request. Stopping signals the worker over a
//! channel and joins it, so no frame is ever written after the guarded work
//! has returned.

use std::io::Write;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const FRAMES: [&str; 4] = ["...", "o..", ".o.", "..o"];
const TICK: Duration = Duration::from_millis(400);
const ERASE: &str = "\u{8}\u{8}\u{8}";

/// Handle to a running indicator. Dropping it stops and joins the worker.
pub struct Spinner {
    stop: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl Spinner {
    /// Start animating on stderr, or do nothing when `enabled` is false.
    #[must_use]
    pub fn start(enabled: bool) -> Self {
        if !enabled {
            return Self {
                stop: None,
                worker: None,
            };
        }
        let (tx, rx) = mpsc::channel();
        let worker = thread::spawn(move || spin(&rx, &mut std::io::stderr()));
        Self {
            stop: Some(tx),
            worker: Some(worker),
        }
    }

    /// Stop the indicator and wait for its worker to exit.
    pub fn stop(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Run `work` with the indicator shown (when `enabled`) and return its result.
pub fn with_progress<T>(enabled: bool, work: impl FnOnce() -> T) -> T {
    let spinner = Spinner::start(enabled);
    let result = work();
    spinner.stop();
    result
}

/// Draw frames until a stop signal arrives or the sender goes away. Each
/// frame is erased before the next one, and the last one before returning.
fn spin<W: Write>(stop: &Receiver<()>, out: &mut W) {
    for frame in FRAMES.iter().cycle() {
        let _ = write!(out, "{frame}");
        let _ = out.flush();
        let stopped = !matches!(stop.recv_timeout(TICK), Err(RecvTimeoutError::Timeout));
        let _ = write!(out, "{ERASE}");
        if stopped {
            let _ = out.flush();
            return;
        }
    }
}
