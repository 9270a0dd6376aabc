//! The call-boundary logger.
//!
//! Wraps service calls with entry and exit hooks:
//!
//! - entry: method name, argument count, and wall-clock start time
//! - successful exit: summarized return value, echoed arguments, elapsed milliseconds
//! - loader calls: the persistence layer's prepared-statement total
//!
//! Failed calls are not logged. Their error is handed back to the caller untouched.

use crate::interception::args::CallArgs;
use crate::interception::context::InvocationContext;
use crate::interception::rule::{CallableIdentity, InterceptionRule};
use crate::interception::summary::{summarize, Summarize};
use crate::observability::sink::{CallEvent, LogLine, LogSink};
use crate::statistics::QueryStatistics;
use std::future::Future;
use std::sync::Arc;

/// ISO-8601 local date-time, without offset.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Instruments calls selected by its rules and writes to an injected sink.
#[derive(Clone)]
pub struct CallBoundaryLogger {
    service_rule: InterceptionRule,
    loader_rule: Option<InterceptionRule>,
    sink: Arc<dyn LogSink>,
    statistics: Option<Arc<dyn QueryStatistics>>,
}

impl CallBoundaryLogger {
    /// Create a logger for calls matching `service_rule`.
    pub fn new(service_rule: InterceptionRule, sink: Arc<dyn LogSink>) -> Self {
        Self {
            service_rule,
            loader_rule: None,
            sink,
            statistics: None,
        }
    }

    /// Report the query counter after successful calls matching `loader_rule`.
    pub fn with_loader(
        mut self,
        loader_rule: InterceptionRule,
        statistics: Arc<dyn QueryStatistics>,
    ) -> Self {
        self.loader_rule = Some(loader_rule);
        self.statistics = Some(statistics);
        self
    }

    /// Whether the general service rule selects this callable.
    pub fn should_instrument(&self, identity: &CallableIdentity) -> bool {
        self.service_rule.matches(identity)
    }

    /// Whether the loader rule selects this callable.
    pub fn is_loader(&self, identity: &CallableIdentity) -> bool {
        self.loader_rule
            .as_ref()
            .is_some_and(|rule| rule.matches(identity))
    }

    /// Entry hook. Logs the start of the call and begins timing it.
    pub fn on_enter(&self, identity: CallableIdentity, args: &CallArgs) -> InvocationContext {
        let ctx = InvocationContext::start(identity, args.len());
        if !self.sink.enabled() {
            return ctx;
        }

        let method = ctx.short_name();
        let message = if args.is_empty() {
            format!("Service: {} - start.", method)
        } else {
            format!("Service: {} - start. Args count - {}", method, args.len())
        };
        self.emit(CallEvent::Start, Some(method), message);
        self.emit(
            CallEvent::StartedAt,
            Some(method),
            format!(
                "{} started at {}",
                method,
                ctx.started_at().format(TIMESTAMP_FORMAT)
            ),
        );

        ctx
    }

    /// Exit hook for a successful call. Consumes the context created by
    /// [`CallBoundaryLogger::on_enter`] for the same call.
    pub fn on_success_return<T>(&self, ctx: InvocationContext, args: &CallArgs, returned: &T)
    where
        T: Summarize + ?Sized,
    {
        if !self.sink.enabled() {
            return;
        }

        let method = ctx.short_name();
        match summarize(returned) {
            Ok(Some(summary)) => self.emit(
                CallEvent::End,
                Some(method),
                format!("Service: {} - end. Returns - {}", method, summary),
            ),
            Ok(None) => self.emit(
                CallEvent::End,
                Some(method),
                format!("Service: {} - end.", method),
            ),
            Err(_) => {}
        }

        if let Some(input) = args.render() {
            self.emit(
                CallEvent::Completed,
                Some(method),
                format!(
                    "{} with input {} completed in {} milliseconds",
                    method,
                    input,
                    ctx.elapsed_ms()
                ),
            );
        }
    }

    /// Report the persistence layer's prepared-statement total.
    pub fn on_loader_service_completion(&self) {
        let Some(statistics) = &self.statistics else {
            return;
        };
        if !self.sink.enabled() {
            return;
        }

        let count = statistics.prepare_statement_count();
        self.emit(
            CallEvent::QueryCount,
            None,
            format!("Total SQL queries executed: {}", count),
        );
    }

    /// Run an async call through the hooks selected for `identity`.
    ///
    /// The delegate's result is returned unchanged. Only `Ok` outcomes are logged.
    pub async fn instrument<T, E, F>(
        &self,
        identity: CallableIdentity,
        args: CallArgs,
        call: F,
    ) -> Result<T, E>
    where
        T: Summarize,
        F: Future<Output = Result<T, E>>,
    {
        let is_loader = self.is_loader(&identity);
        let ctx = self
            .should_instrument(&identity)
            .then(|| self.on_enter(identity, &args));

        let result = call.await;
        if let Ok(value) = &result {
            self.after_success(ctx, &args, value, is_loader);
        }
        result
    }

    /// Blocking counterpart of [`CallBoundaryLogger::instrument`].
    pub fn instrument_blocking<T, E, F>(
        &self,
        identity: CallableIdentity,
        args: CallArgs,
        call: F,
    ) -> Result<T, E>
    where
        T: Summarize,
        F: FnOnce() -> Result<T, E>,
    {
        let is_loader = self.is_loader(&identity);
        let ctx = self
            .should_instrument(&identity)
            .then(|| self.on_enter(identity, &args));

        let result = call();
        if let Ok(value) = &result {
            self.after_success(ctx, &args, value, is_loader);
        }
        result
    }

    fn after_success<T: Summarize>(
        &self,
        ctx: Option<InvocationContext>,
        args: &CallArgs,
        value: &T,
        is_loader: bool,
    ) {
        if let Some(ctx) = ctx {
            self.on_success_return(ctx, args, value);
        }
        if is_loader {
            self.on_loader_service_completion();
        }
    }

    fn emit(&self, event: CallEvent, method: Option<&str>, message: String) {
        self.sink.debug(&LogLine {
            event,
            method: method.map(str::to_string),
            message,
        });
    }
}

impl std::fmt::Debug for CallBoundaryLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallBoundaryLogger")
            .field("service_rule", &self.service_rule)
            .field("loader_rule", &self.loader_rule)
            .field("counts_queries", &self.statistics.is_some())
            .finish()
    }
}
