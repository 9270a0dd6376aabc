//! Log sinks the call-boundary logger writes to.
//!
//! The sink is injected into the logger rather than reached through global state,
//! so tests can capture exactly what an invocation emitted.

use std::fmt;
use std::sync::{Arc, Mutex};

/// Target used for every line emitted through [`TracingSink`].
pub const LOG_TARGET: &str = "service_call";

const ANSI_RESET: &str = "\u{1b}[0m";
const ANSI_BLUE: &str = "\u{1b}[34m";
const ANSI_CYAN: &str = "\u{1b}[36m";

/// Which hook produced a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallEvent {
    /// Entry line with the argument count
    Start,
    /// Entry line with the wall-clock start time
    StartedAt,
    /// Exit line with the return value summary
    End,
    /// Exit line with the echoed input and elapsed time
    Completed,
    /// Loader query counter report
    QueryCount,
}

impl CallEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::StartedAt => "started_at",
            Self::End => "end",
            Self::Completed => "completed",
            Self::QueryCount => "query_count",
        }
    }
}

impl fmt::Display for CallEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single DEBUG line produced by the logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub event: CallEvent,

    /// Short method name, absent for the query counter report
    pub method: Option<String>,

    pub message: String,
}

/// Destination for call-boundary log lines. Everything is written at DEBUG.
pub trait LogSink: Send + Sync {
    /// Whether lines would be recorded at all. When false the logger skips
    /// formatting work entirely.
    fn enabled(&self) -> bool {
        true
    }

    fn debug(&self, line: &LogLine);
}

/// ANSI colouring applied by [`TracingSink`]: blue for service calls, cyan for
/// the query counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Wrap a message in the colour for its event.
    pub fn paint(&self, event: CallEvent, message: &str) -> String {
        if !self.enabled {
            return message.to_string();
        }
        let color = match event {
            CallEvent::QueryCount => ANSI_CYAN,
            _ => ANSI_BLUE,
        };
        format!("{}{}{}", color, message, ANSI_RESET)
    }
}

/// Sink that forwards lines to `tracing` at DEBUG level.
#[derive(Debug, Clone, Default)]
pub struct TracingSink {
    palette: Palette,
}

impl TracingSink {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }
}

impl LogSink for TracingSink {
    fn enabled(&self) -> bool {
        tracing::enabled!(target: LOG_TARGET, tracing::Level::DEBUG)
    }

    fn debug(&self, line: &LogLine) {
        let message = self.palette.paint(line.event, &line.message);
        match &line.method {
            Some(method) => tracing::debug!(
                target: LOG_TARGET,
                event = line.event.as_str(),
                method = %method,
                "{}",
                message
            ),
            None => tracing::debug!(
                target: LOG_TARGET,
                event = line.event.as_str(),
                "{}",
                message
            ),
        }
    }
}

/// Sink that keeps every line in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<LogLine>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured lines, in emission order.
    pub fn lines(&self) -> Vec<LogLine> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Captured messages, in emission order.
    pub fn messages(&self) -> Vec<String> {
        self.lines().into_iter().map(|l| l.message).collect()
    }

    /// Captured lines of one event kind.
    pub fn lines_for(&self, event: CallEvent) -> Vec<LogLine> {
        self.lines()
            .into_iter()
            .filter(|l| l.event == event)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

impl LogSink for MemorySink {
    fn debug(&self, line: &LogLine) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.clone());
        }
    }
}
