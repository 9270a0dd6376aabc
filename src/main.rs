//! Service Call Logger - demo entry point
//!
//! Fills the in-memory database through the instrumented loader, then exercises
//! the employee service so every call-boundary log line can be seen on stderr.

use anyhow::Result;
use service_call_logger::repositories::{EmployeeRepository, InMemoryEmployeeRepository};
use service_call_logger::services::{
    EmployeeService, EmployeeServiceBean, InstrumentedEmployeeService, InstrumentedLoaderService,
    LoaderService, LoaderServiceBean,
};
use service_call_logger::{Config, Employee, PersistenceStatistics};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration before logging so LOG_LEVEL can drive the filter
    let config = Config::from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi_colors)
        .init();

    info!(
        namespace = %config.service_namespace,
        loader = %config.loader_target,
        "Configuration loaded successfully"
    );

    // Persistence layer
    let statistics = PersistenceStatistics::new();
    let repository = Arc::new(InMemoryEmployeeRepository::new(statistics.clone()))
        as Arc<dyn EmployeeRepository>;

    // Services wrapped with call-boundary logging
    let logger = Arc::new(config.build_logger(Arc::new(statistics.clone())));
    let loader = InstrumentedLoaderService::new(
        Arc::new(LoaderServiceBean::new(repository.clone())),
        logger.clone(),
    );
    let employees = InstrumentedEmployeeService::new(
        Arc::new(EmployeeServiceBean::new(repository)),
        logger,
    );

    loader.fill_database(config.loader_employee_count).await?;
    loader.count_rows().await?;

    let created = employees
        .create(Employee::new("Olena", "olena@example.com", "Ukraine"))
        .await?;
    employees.get_by_id(created.id).await?;
    employees
        .update_by_id(
            created.id,
            Employee::new("Olena K.", "olena.k@example.com", "Ukraine"),
        )
        .await?;

    // Overlapping calls each report their own elapsed time
    let (all, ukrainians) = futures::join!(
        employees.get_all(),
        employees.find_by_country("Ukraine")
    );
    info!(
        total = all?.len(),
        in_ukraine = ukrainians?.len(),
        "Employees listed"
    );

    let export = employees.export_csv().await?;
    info!(bytes = export.len(), "CSV export produced");

    employees.remove_by_id(created.id).await?;

    // Failures propagate untouched and are not logged by the interceptor
    if let Err(e) = employees.get_by_id(created.id).await {
        error!("Expected lookup failure after removal: {}", e);
    }

    let summary = statistics.summary();
    info!(
        statements = summary.prepare_statement_count,
        inserts = summary.entity_insert_count,
        updates = summary.entity_update_count,
        loads = summary.entity_load_count,
        "Service call logger demo complete"
    );
    Ok(())
}
