//! Call-boundary instrumentation.
//!
//! Selected calls are wrapped with entry and exit hooks that log the method,
//! its arguments, a summary of what it returned, and how long it took.
//! Composition is explicit: a decorator hands the real call to
//! [`CallBoundaryLogger::instrument`] instead of relying on implicit weaving.

pub mod args;
pub mod context;
pub mod logger;
pub mod rule;
pub mod summary;

pub use args::CallArgs;
pub use context::InvocationContext;
pub use logger::CallBoundaryLogger;
pub use rule::{CallableIdentity, InterceptionRule, Visibility};
pub use summary::{FileContent, RenderKind, Summarize, SummaryValue};
