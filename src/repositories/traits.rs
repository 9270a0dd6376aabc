use crate::error::RepositoryResult;
use crate::models::Employee;
use async_trait::async_trait;

/// Repository for managing employees.
///
/// Provides abstraction over employee storage, enabling different
/// implementations (in-memory, mock, database-backed).
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Retrieve every stored employee, ordered by ID.
    async fn find_all(&self) -> RepositoryResult<Vec<Employee>>;

    /// Retrieve a single employee by ID.
    async fn find_by_id(&self, id: u64) -> RepositoryResult<Option<Employee>>;

    /// Retrieve employees living in the given country.
    async fn find_by_country(&self, country: &str) -> RepositoryResult<Vec<Employee>>;

    /// Insert a new employee (ID 0) or update an existing one.
    async fn save(&self, employee: Employee) -> RepositoryResult<Employee>;

    /// Insert `count` new rows in one batch. `generate` builds each row from the
    /// ID it will be stored under. Either every row is inserted or none is.
    async fn insert_generated(
        &self,
        count: usize,
        generate: &(dyn Fn(u64) -> Employee + Send + Sync),
    ) -> RepositoryResult<Vec<Employee>>;

    /// Number of stored rows.
    async fn count(&self) -> RepositoryResult<usize>;
}
