//! Event sinks.

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{EventKind, SimEvent};

/// Receiver of simulation events. Called from many workers at once.
pub trait EventSink: Send + Sync {
    /// Observe one event.
    fn emit(&self, event: &SimEvent);
}

/// Console rendering of events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable line per event.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Writes events to a writer, one line per event.
///
/// The writer sits behind its own mutex (the output lock), independent of
/// the queue lock, so lines from different workers never interleave.
pub struct ConsoleSink<W: Write + Send> {
    out: Mutex<W>,
    format: OutputFormat,
}

impl ConsoleSink<io::Stdout> {
    /// Sink that writes to standard output.
    #[must_use]
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    /// Sink over an arbitrary writer.
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            out: Mutex::new(writer),
            format,
        }
    }

    /// Recover the writer (tests inspect buffered output this way).
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn render(&self, event: &SimEvent) -> Option<String> {
        match self.format {
            OutputFormat::Text => Some(event.to_string()),
            OutputFormat::Json => match serde_json::to_string(event) {
                Ok(line) => Some(line),
                Err(error) => {
                    tracing::warn!(kind = event.kind().as_str(), "failed to encode event: {error}");
                    None
                }
            },
        }
    }
}

impl<W: Write + Send> EventSink for ConsoleSink<W> {
    fn emit(&self, event: &SimEvent) {
        let Some(line) = self.render(event) else {
            return;
        };
        let mut out = lock(&self.out);
        if let Err(error) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            tracing::warn!("failed to write event: {error}");
        }
    }
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SimEvent>>,
}

impl RecordingSink {
    /// Empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<SimEvent> {
        lock(&self.events).clone()
    }

    /// Number of recorded events of one kind.
    #[must_use]
    pub fn count(&self, kind: EventKind) -> usize {
        lock(&self.events)
            .iter()
            .filter(|event| event.kind() == kind)
            .count()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.events).len()
    }

    /// True when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.events).is_empty()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &SimEvent) {
        lock(&self.events).push(event.clone());
    }
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &SimEvent) {}
}

// A panic while holding the lock leaves the data intact; keep going.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
