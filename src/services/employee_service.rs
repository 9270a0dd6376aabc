//! Employee service layer.
//!
//! Business logic for employee management, plus the decorator that routes
//! every public call through the call-boundary logger.

use crate::call_args;
use crate::error::{ServiceError, ServiceResult};
use crate::interception::{CallBoundaryLogger, CallableIdentity, FileContent};
use crate::models::Employee;
use crate::repositories::EmployeeRepository;
use async_trait::async_trait;
use std::sync::Arc;

const CSV_HEADER: &str = "id,name,email,country";

/// Employee service trait for business operations.
#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// Validate and store a new employee.
    async fn create(&self, employee: Employee) -> ServiceResult<Employee>;

    /// All employees that are not soft-deleted.
    async fn get_all(&self) -> ServiceResult<Vec<Employee>>;

    /// A single active employee.
    async fn get_by_id(&self, id: u64) -> ServiceResult<Employee>;

    /// Replace name, email and country of an active employee.
    async fn update_by_id(&self, id: u64, employee: Employee) -> ServiceResult<Employee>;

    /// Soft-delete an employee.
    async fn remove_by_id(&self, id: u64) -> ServiceResult<()>;

    /// Active employees living in a country.
    async fn find_by_country(&self, country: &str) -> ServiceResult<Vec<Employee>>;

    /// Active employees as a CSV file.
    async fn export_csv(&self) -> ServiceResult<FileContent>;
}

/// Default implementation of EmployeeService.
pub struct EmployeeServiceBean {
    repository: Arc<dyn EmployeeRepository>,
}

/// Validation helper functions.
impl EmployeeServiceBean {
    fn validate(employee: &Employee) -> Result<(), String> {
        if employee.name.trim().is_empty() {
            return Err("Employee name cannot be empty".to_string());
        }
        if !employee.email.contains('@') {
            return Err(format!("Invalid email address: {}", employee.email));
        }
        Ok(())
    }
}

impl EmployeeServiceBean {
    /// Create a new employee service.
    pub fn new(repository: Arc<dyn EmployeeRepository>) -> Self {
        Self { repository }
    }

    async fn find_active(&self, id: u64) -> ServiceResult<Employee> {
        match self.repository.find_by_id(id).await? {
            Some(employee) if !employee.is_deleted => Ok(employee),
            _ => Err(ServiceError::NotFound(id)),
        }
    }
}

#[async_trait]
impl EmployeeService for EmployeeServiceBean {
    async fn create(&self, mut employee: Employee) -> ServiceResult<Employee> {
        Self::validate(&employee).map_err(ServiceError::InvalidRequest)?;
        employee.id = 0;
        employee.is_deleted = false;
        Ok(self.repository.save(employee).await?)
    }

    async fn get_all(&self) -> ServiceResult<Vec<Employee>> {
        let all = self.repository.find_all().await?;
        Ok(all.into_iter().filter(|e| !e.is_deleted).collect())
    }

    async fn get_by_id(&self, id: u64) -> ServiceResult<Employee> {
        self.find_active(id).await
    }

    async fn update_by_id(&self, id: u64, employee: Employee) -> ServiceResult<Employee> {
        Self::validate(&employee).map_err(ServiceError::InvalidRequest)?;
        let mut current = self.find_active(id).await?;
        current.name = employee.name;
        current.email = employee.email;
        current.country = employee.country;
        Ok(self.repository.save(current).await?)
    }

    async fn remove_by_id(&self, id: u64) -> ServiceResult<()> {
        let mut current = self.find_active(id).await?;
        current.is_deleted = true;
        self.repository.save(current).await?;
        Ok(())
    }

    async fn find_by_country(&self, country: &str) -> ServiceResult<Vec<Employee>> {
        if country.trim().is_empty() {
            return Err(ServiceError::InvalidRequest(
                "Country cannot be empty".to_string(),
            ));
        }
        let found = self.repository.find_by_country(country).await?;
        Ok(found.into_iter().filter(|e| !e.is_deleted).collect())
    }

    async fn export_csv(&self) -> ServiceResult<FileContent> {
        let employees = self.get_all().await?;
        let mut csv = String::from(CSV_HEADER);
        for employee in &employees {
            csv.push('\n');
            csv.push_str(&employee.to_csv_row());
        }
        Ok(FileContent(csv.into_bytes()))
    }
}

/// Identity of an [`EmployeeServiceBean`] method.
fn identity(method: &str) -> CallableIdentity {
    CallableIdentity::public(module_path!(), "EmployeeServiceBean", method)
}

/// [`EmployeeService`] decorator that logs every call at its boundary.
pub struct InstrumentedEmployeeService {
    inner: Arc<dyn EmployeeService>,
    logger: Arc<CallBoundaryLogger>,
}

impl InstrumentedEmployeeService {
    pub fn new(inner: Arc<dyn EmployeeService>, logger: Arc<CallBoundaryLogger>) -> Self {
        Self { inner, logger }
    }
}

#[async_trait]
impl EmployeeService for InstrumentedEmployeeService {
    async fn create(&self, employee: Employee) -> ServiceResult<Employee> {
        let args = call_args![employee];
        self.logger
            .instrument(identity("create"), args, self.inner.create(employee))
            .await
    }

    async fn get_all(&self) -> ServiceResult<Vec<Employee>> {
        self.logger
            .instrument(identity("get_all"), call_args![], self.inner.get_all())
            .await
    }

    async fn get_by_id(&self, id: u64) -> ServiceResult<Employee> {
        self.logger
            .instrument(identity("get_by_id"), call_args![id], self.inner.get_by_id(id))
            .await
    }

    async fn update_by_id(&self, id: u64, employee: Employee) -> ServiceResult<Employee> {
        let args = call_args![id, employee];
        self.logger
            .instrument(
                identity("update_by_id"),
                args,
                self.inner.update_by_id(id, employee),
            )
            .await
    }

    async fn remove_by_id(&self, id: u64) -> ServiceResult<()> {
        self.logger
            .instrument(
                identity("remove_by_id"),
                call_args![id],
                self.inner.remove_by_id(id),
            )
            .await
    }

    async fn find_by_country(&self, country: &str) -> ServiceResult<Vec<Employee>> {
        self.logger
            .instrument(
                identity("find_by_country"),
                call_args![country],
                self.inner.find_by_country(country),
            )
            .await
    }

    async fn export_csv(&self) -> ServiceResult<FileContent> {
        self.logger
            .instrument(identity("export_csv"), call_args![], self.inner.export_csv())
            .await
    }
}
