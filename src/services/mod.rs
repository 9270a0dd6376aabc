//! Application service layer.
//!
//! Services contain business logic over the repositories. Each one comes with an
//! `Instrumented*` decorator that wraps it with call-boundary logging.

mod employee_service;
mod fill_database;

pub use employee_service::{EmployeeService, EmployeeServiceBean, InstrumentedEmployeeService};
pub use fill_database::{
    InstrumentedLoaderService, LoaderService, LoaderServiceBean, LOADER_TARGET, MAX_FILL_COUNT,
};

/// Namespace every service bean is declared under.
pub const SERVICE_NAMESPACE: &str = module_path!();
