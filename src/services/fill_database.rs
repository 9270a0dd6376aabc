//! Database loader service.
//!
//! Fills the employee table with generated rows. Calls to [`LoaderServiceBean`]
//! are the ones whose query totals get reported after completion.

use crate::call_args;
use crate::error::{ServiceError, ServiceResult};
use crate::interception::{CallBoundaryLogger, CallableIdentity};
use crate::models::Employee;
use crate::repositories::EmployeeRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Fully qualified path of the loader bean.
pub const LOADER_TARGET: &str = concat!(module_path!(), "::LoaderServiceBean");

/// Upper bound on rows generated by a single call.
pub const MAX_FILL_COUNT: usize = 10_000;

const COUNTRIES: [&str; 5] = ["Ukraine", "Poland", "Germany", "Spain", "Canada"];

/// Loader service trait.
#[async_trait]
pub trait LoaderService: Send + Sync {
    /// Generate and insert `count` employees. Returns the number of rows inserted.
    async fn fill_database(&self, count: usize) -> ServiceResult<usize>;

    /// Number of rows currently stored.
    async fn count_rows(&self) -> ServiceResult<usize>;
}

/// Default implementation of LoaderService.
pub struct LoaderServiceBean {
    repository: Arc<dyn EmployeeRepository>,
}

impl LoaderServiceBean {
    /// Create a new loader service.
    pub fn new(repository: Arc<dyn EmployeeRepository>) -> Self {
        Self { repository }
    }

    /// Deterministic employee for the row stored under `id`.
    fn generate(id: u64) -> Employee {
        Employee::new(
            format!("Employee {}", id),
            format!("employee{}@example.com", id),
            COUNTRIES[(id % COUNTRIES.len() as u64) as usize],
        )
    }
}

#[async_trait]
impl LoaderService for LoaderServiceBean {
    async fn fill_database(&self, count: usize) -> ServiceResult<usize> {
        if count > MAX_FILL_COUNT {
            return Err(ServiceError::InvalidRequest(format!(
                "Cannot generate more than {} rows at once",
                MAX_FILL_COUNT
            )));
        }

        let saved = self
            .repository
            .insert_generated(count, &Self::generate)
            .await?;

        tracing::info!(inserted = saved.len(), "Database filled");
        Ok(saved.len())
    }

    async fn count_rows(&self) -> ServiceResult<usize> {
        Ok(self.repository.count().await?)
    }
}

fn identity(method: &str) -> CallableIdentity {
    CallableIdentity::public(module_path!(), "LoaderServiceBean", method)
}

/// [`LoaderService`] decorator that logs every call and reports query totals.
pub struct InstrumentedLoaderService {
    inner: Arc<dyn LoaderService>,
    logger: Arc<CallBoundaryLogger>,
}

impl InstrumentedLoaderService {
    pub fn new(inner: Arc<dyn LoaderService>, logger: Arc<CallBoundaryLogger>) -> Self {
        Self { inner, logger }
    }
}

#[async_trait]
impl LoaderService for InstrumentedLoaderService {
    async fn fill_database(&self, count: usize) -> ServiceResult<usize> {
        self.logger
            .instrument(
                identity("fill_database"),
                call_args![count],
                self.inner.fill_database(count),
            )
            .await
    }

    async fn count_rows(&self) -> ServiceResult<usize> {
        self.logger
            .instrument(identity("count_rows"), call_args![], self.inner.count_rows())
            .await
    }
}
