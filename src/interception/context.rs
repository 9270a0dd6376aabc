//! Per-invocation state carried from the entry hook to the exit hook.

use crate::interception::rule::CallableIdentity;
use chrono::{DateTime, Local};
use std::time::Instant;

/// State of one in-flight call.
///
/// Every invocation owns its own context; the exit hook consumes it, so a context
/// cannot be finalized twice and never observes another call's start time.
#[derive(Debug)]
pub struct InvocationContext {
    identity: CallableIdentity,
    short_name: String,
    started: Instant,
    started_at: DateTime<Local>,
}

impl InvocationContext {
    /// Start timing a call.
    pub fn start(identity: CallableIdentity, arity: usize) -> Self {
        let short_name = identity.short_string(arity);
        Self {
            identity,
            short_name,
            started: Instant::now(),
            started_at: Local::now(),
        }
    }

    pub fn identity(&self) -> &CallableIdentity {
        &self.identity
    }

    /// `Type::method(..)` form used in log lines.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Wall-clock time the call started.
    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Milliseconds since this call started, measured on a monotonic clock.
    pub fn elapsed_ms(&self) -> u128 {
        self.started.elapsed().as_millis()
    }
}
