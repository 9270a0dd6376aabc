//! Service Call Logger - call-boundary debug logging for a service layer.
//!
//! Selected service calls are wrapped so that their entry, arguments, return value
//! summary and elapsed time are logged at DEBUG level. Calls into the database
//! loader additionally report how many SQL statements the persistence layer has
//! executed so far.
//!
//! # Architecture
//!
//! - **interception**: Rules, per-call context, return value summaries and the logger
//! - **observability**: Log sinks (`tracing` backed and in-memory)
//! - **statistics**: Persistence-layer counters read by the loader report
//! - **models**: Employee data structure
//! - **repositories**: Employee storage
//! - **services**: Employee and loader services with their logging decorators
//! - **config**: Configuration management from environment variables
//! - **error**: Custom error types for precise error handling

pub mod config;
pub mod error;
pub mod interception;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod services;
pub mod statistics;

pub use config::Config;
pub use error::{ConfigError, RepositoryError, ServiceError};
pub use interception::{
    CallArgs, CallBoundaryLogger, CallableIdentity, FileContent, InterceptionRule,
    InvocationContext, RenderKind, Summarize, SummaryValue, Visibility,
};
pub use models::Employee;
pub use observability::{CallEvent, LogLine, LogSink, MemorySink, Palette, TracingSink};
pub use statistics::{PersistenceStatistics, QueryStatistics, StatisticsSummary};
