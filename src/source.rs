//! Raw event feed
//!
//! Events arrive as JSON lines from the grab/record helper (stdin or a
//! file). A reader thread parses them and sends them, in order, over a
//! channel to the single thread that owns the [`Interceptor`].

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use crate::chord::RawEvent;
use crate::interceptor::{Interceptor, Outcome};

/// Event feed running on its own thread
pub struct EventSource {
    rx: Receiver<RawEvent>,
    handle: JoinHandle<usize>,
}

impl EventSource {
    /// Start reading JSON lines from `reader`
    ///
    /// Blank lines are ignored; malformed lines are logged and skipped.
    pub fn spawn<R: BufRead + Send + 'static>(reader: R) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("event-source".to_string())
            .spawn(move || {
                let mut skipped = 0;
                for (index, line) in reader.lines().enumerate() {
                    let line = match line {
                        Ok(line) => line,
                        Err(e) => {
                            tracing::error!("event feed read error: {}", e);
                            break;
                        }
                    };
                    if line.trim().is_empty() {
                        continue;
                    }

                    match RawEvent::from_json_line(&line) {
                        Ok(event) => {
                            if tx.send(event).is_err() {
                                // Handler went away
                                break;
                            }
                        }
                        Err(e) => {
                            skipped += 1;
                            tracing::warn!(line = index + 1, "skipping malformed event: {}", e);
                        }
                    }
                }
                skipped
            })?;

        Ok(Self { rx, handle })
    }

    /// Read from a file, or stdin when no path is given
    pub fn open(path: Option<&Path>) -> io::Result<Self> {
        match path {
            Some(path) => {
                tracing::info!("Reading events from {}", path.display());
                Self::spawn(BufReader::new(File::open(path)?))
            }
            None => {
                tracing::info!("Reading events from stdin");
                Self::spawn(BufReader::new(io::stdin()))
            }
        }
    }

    /// Receiving end, in arrival order
    pub fn events(&self) -> &Receiver<RawEvent> {
        &self.rx
    }

    /// Wait for the reader to finish; returns how many lines were skipped
    pub fn join(self) -> usize {
        drop(self.rx);
        self.handle.join().unwrap_or_else(|_| {
            tracing::error!("event reader thread panicked");
            0
        })
    }
}

/// Totals for one run of the handler loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub events: usize,
    pub handled: usize,
    pub replayed: usize,
    pub forwarded: usize,
    pub failed: usize,
}

impl RunStats {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Handled => self.handled += 1,
            Outcome::Replayed => self.replayed += 1,
            Outcome::Forwarded => self.forwarded += 1,
            Outcome::Failed => self.failed += 1,
        }
    }
}

/// Drive the interceptor until the feed ends
pub fn run(interceptor: &mut Interceptor, events: &Receiver<RawEvent>) -> RunStats {
    let mut stats = RunStats::default();
    for event in events.iter() {
        stats.events += 1;
        if let Some(outcome) = interceptor.handle_event(event) {
            stats.record(outcome);
        }
    }

    if !interceptor.is_idle() {
        tracing::warn!(
            buffered = interceptor.accumulator().events().len(),
            "event feed ended mid-cycle"
        );
    }
    stats
}
