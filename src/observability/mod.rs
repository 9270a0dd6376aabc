//! Observability module for log output.
//!
//! This module provides the sinks the call-boundary logger writes to: a `tracing`
//! backed sink for production and an in-memory sink for capturing lines.

pub mod sink;

pub use sink::{CallEvent, LogLine, LogSink, MemorySink, Palette, TracingSink};
