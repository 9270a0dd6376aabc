//! Configuration management for the service call logger.
//!
//! This module handles loading and validating configuration from environment variables,
//! reading a `.env` file first if one is present.

use crate::error::{ConfigError, ConfigResult};
use crate::interception::{CallBoundaryLogger, InterceptionRule};
use crate::observability::{LogSink, Palette, TracingSink};
use crate::services::{LOADER_TARGET, SERVICE_NAMESPACE};
use crate::statistics::QueryStatistics;
use std::env;
use std::sync::Arc;

/// Configuration for the service call logger.
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace whose public methods are instrumented
    pub service_namespace: String,

    /// Fully qualified loader type whose calls report query totals
    pub loader_target: String,

    /// Colour log lines with ANSI escapes (default: true)
    pub ansi_colors: bool,

    /// Rows generated by the demo loader run (default: 10)
    pub loader_employee_count: usize,

    /// Log level (default: "debug")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `SERVICE_LOG_NAMESPACE`: Instrumented namespace (default: the crate's services module)
    /// - `SERVICE_LOG_LOADER_TARGET`: Loader type reporting query totals (default: `LoaderServiceBean`)
    /// - `SERVICE_LOG_COLORS`: ANSI colours on/off (default: true)
    /// - `LOADER_EMPLOYEE_COUNT`: Rows generated by the demo run (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "debug")
    pub fn from_env() -> ConfigResult<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        let service_namespace =
            env::var("SERVICE_LOG_NAMESPACE").unwrap_or_else(|_| SERVICE_NAMESPACE.to_string());
        let loader_target =
            env::var("SERVICE_LOG_LOADER_TARGET").unwrap_or_else(|_| LOADER_TARGET.to_string());
        let ansi_colors = Self::parse_env_bool("SERVICE_LOG_COLORS", true)?;
        let loader_employee_count = Self::parse_env_usize("LOADER_EMPLOYEE_COUNT", 10)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "debug".to_string());

        let config = Config {
            service_namespace,
            loader_target,
            ansi_colors,
            loader_employee_count,
            log_level,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check path-shaped values.
    pub fn validate(&self) -> ConfigResult<()> {
        Self::validate_path("SERVICE_LOG_NAMESPACE", &self.service_namespace)?;
        Self::validate_path("SERVICE_LOG_LOADER_TARGET", &self.loader_target)
    }

    /// Build the call-boundary logger writing to `tracing`.
    pub fn build_logger(&self, statistics: Arc<dyn QueryStatistics>) -> CallBoundaryLogger {
        let sink = Arc::new(TracingSink::new(Palette::new(self.ansi_colors)));
        self.build_logger_with_sink(sink, statistics)
    }

    /// Build the call-boundary logger writing to the given sink.
    pub fn build_logger_with_sink(
        &self,
        sink: Arc<dyn LogSink>,
        statistics: Arc<dyn QueryStatistics>,
    ) -> CallBoundaryLogger {
        CallBoundaryLogger::new(
            InterceptionRule::PublicUnder(self.service_namespace.clone()),
            sink,
        )
        .with_loader(
            InterceptionRule::AllMethodsOf(self.loader_target.clone()),
            statistics,
        )
    }

    fn validate_path(var_name: &str, value: &str) -> ConfigResult<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }
        if value.starts_with("::") || value.ends_with("::") {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Must not start or end with '::'".to_string(),
            });
        }
        Ok(())
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as bool with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            service_namespace: SERVICE_NAMESPACE.to_string(),
            loader_target: LOADER_TARGET.to_string(),
            ansi_colors: true,
            loader_employee_count: 10,
            log_level: "debug".to_string(),
        }
    }
}
