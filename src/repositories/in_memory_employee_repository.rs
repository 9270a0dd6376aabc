use crate::error::{RepositoryError, RepositoryResult};
use crate::models::Employee;
use crate::repositories::traits::EmployeeRepository;
use crate::statistics::PersistenceStatistics;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Employee repository kept in process memory.
///
/// Every operation counts as one prepared statement in the shared
/// [`PersistenceStatistics`]; batch inserts count one statement per row.
pub struct InMemoryEmployeeRepository {
    rows: RwLock<BTreeMap<u64, Employee>>,
    /// Only advanced while the write lock is held
    next_id: AtomicU64,
    statistics: PersistenceStatistics,
}

impl InMemoryEmployeeRepository {
    /// Create an empty repository reporting to `statistics`.
    pub fn new(statistics: PersistenceStatistics) -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
            statistics,
        }
    }

    pub fn statistics(&self) -> &PersistenceStatistics {
        &self.statistics
    }

    /// Insert or update one row while the write lock is held.
    fn save_row(
        &self,
        rows: &mut BTreeMap<u64, Employee>,
        mut employee: Employee,
    ) -> RepositoryResult<Employee> {
        self.statistics.record_statement();

        let email_taken = rows
            .values()
            .any(|row| row.id != employee.id && row.email == employee.email);
        if email_taken {
            return Err(RepositoryError::ConstraintViolation(format!(
                "email {} already exists",
                employee.email
            )));
        }

        if employee.id == 0 {
            employee.id = self.next_id.fetch_add(1, Ordering::Relaxed);
            self.statistics.record_inserts(1);
        } else if rows.contains_key(&employee.id) {
            self.statistics.record_updates(1);
        } else {
            return Err(RepositoryError::NotFound(employee.id));
        }

        rows.insert(employee.id, employee.clone());
        Ok(employee)
    }

    /// Reject a batch of new rows if any email is already stored or repeats
    /// within the batch.
    fn check_unique_emails(
        rows: &BTreeMap<u64, Employee>,
        batch: &[Employee],
    ) -> RepositoryResult<()> {
        let mut taken: HashSet<&str> = rows.values().map(|row| row.email.as_str()).collect();
        match batch.iter().find(|row| !taken.insert(row.email.as_str())) {
            Some(row) => Err(RepositoryError::ConstraintViolation(format!(
                "email {} already exists",
                row.email
            ))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Employee>> {
        self.statistics.record_statement();
        let rows = self.rows.read().map_err(|_| RepositoryError::Unavailable)?;
        let result: Vec<Employee> = rows.values().cloned().collect();
        self.statistics.record_loads(result.len());
        Ok(result)
    }

    async fn find_by_id(&self, id: u64) -> RepositoryResult<Option<Employee>> {
        self.statistics.record_statement();
        let rows = self.rows.read().map_err(|_| RepositoryError::Unavailable)?;
        let result = rows.get(&id).cloned();
        if result.is_some() {
            self.statistics.record_loads(1);
        }
        Ok(result)
    }

    async fn find_by_country(&self, country: &str) -> RepositoryResult<Vec<Employee>> {
        self.statistics.record_statement();
        let rows = self.rows.read().map_err(|_| RepositoryError::Unavailable)?;
        let result: Vec<Employee> = rows
            .values()
            .filter(|row| row.country.eq_ignore_ascii_case(country))
            .cloned()
            .collect();
        self.statistics.record_loads(result.len());
        Ok(result)
    }

    async fn save(&self, employee: Employee) -> RepositoryResult<Employee> {
        let mut rows = self.rows.write().map_err(|_| RepositoryError::Unavailable)?;
        self.save_row(&mut rows, employee)
    }

    async fn insert_generated(
        &self,
        count: usize,
        generate: &(dyn Fn(u64) -> Employee + Send + Sync),
    ) -> RepositoryResult<Vec<Employee>> {
        let mut rows = self.rows.write().map_err(|_| RepositoryError::Unavailable)?;

        let first_id = self.next_id.load(Ordering::Relaxed);
        let end_id = first_id + count as u64;
        let batch: Vec<Employee> = (first_id..end_id)
            .map(|id| Employee { id, ..generate(id) })
            .collect();
        for _ in &batch {
            self.statistics.record_statement();
        }

        // Nothing is written, and no ID consumed, unless the whole batch fits
        Self::check_unique_emails(&rows, &batch)?;

        self.next_id.store(end_id, Ordering::Relaxed);
        for employee in &batch {
            rows.insert(employee.id, employee.clone());
        }
        self.statistics.record_inserts(batch.len());
        Ok(batch)
    }

    async fn count(&self) -> RepositoryResult<usize> {
        self.statistics.record_statement();
        let rows = self.rows.read().map_err(|_| RepositoryError::Unavailable)?;
        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::QueryStatistics;

    fn repository() -> InMemoryEmployeeRepository {
        InMemoryEmployeeRepository::new(PersistenceStatistics::new())
    }

    #[tokio::test]
    async fn test_save_assigns_ids() {
        let repo = repository();
        let first = repo
            .save(Employee::new("Ann", "ann@example.com", "Ukraine"))
            .await
            .unwrap();
        let second = repo
            .save(Employee::new("Bo", "bo@example.com", "Poland"))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_save_rejects_duplicate_email() {
        let repo = repository();
        repo.save(Employee::new("Ann", "ann@example.com", "Ukraine"))
            .await
            .unwrap();
        let result = repo
            .save(Employee::new("Ann Two", "ann@example.com", "Ukraine"))
            .await;

        assert!(matches!(
            result,
            Err(RepositoryError::ConstraintViolation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let repo = repository();
        let mut ghost = Employee::new("Ghost", "ghost@example.com", "Nowhere");
        ghost.id = 42;
        assert_eq!(repo.save(ghost).await, Err(RepositoryError::NotFound(42)));
    }

    fn generated(id: u64) -> Employee {
        Employee::new(
            format!("Gen {}", id),
            format!("gen{}@example.com", id),
            if id % 2 == 0 { "Ukraine" } else { "ukraine" },
        )
    }

    #[tokio::test]
    async fn test_find_by_country_ignores_case() {
        let repo = repository();
        repo.insert_generated(3, &generated).await.unwrap();
        repo.save(Employee::new("Bo", "bo@example.com", "Poland"))
            .await
            .unwrap();

        let found = repo.find_by_country("UKRAINE").await.unwrap();
        assert_eq!(found.len(), 3);
    }

    #[tokio::test]
    async fn test_insert_generated_builds_rows_from_ids() {
        let repo = repository();
        repo.save(Employee::new("Ann", "ann@example.com", "Ukraine"))
            .await
            .unwrap();

        let saved = repo.insert_generated(2, &generated).await.unwrap();
        let ids: Vec<u64> = saved.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(saved[1].email, "gen3@example.com");
        assert_eq!(repo.find_by_id(3).await.unwrap(), Some(saved[1].clone()));
    }

    #[tokio::test]
    async fn test_insert_generated_is_all_or_nothing() {
        let repo = repository();
        repo.save(Employee::new("Taken", "gen3@example.com", "Spain"))
            .await
            .unwrap();

        // ids 2..=6 would be generated; id 3 collides with the stored email
        let result = repo.insert_generated(5, &generated).await;
        assert_eq!(
            result,
            Err(RepositoryError::ConstraintViolation(
                "email gen3@example.com already exists".to_string()
            ))
        );
        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(repo.statistics().entity_insert_count(), 1);

        // No IDs were consumed by the rejected batch
        let next = repo
            .save(Employee::new("Bo", "bo@example.com", "Poland"))
            .await
            .unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn test_insert_generated_rejects_duplicates_within_batch() {
        let repo = repository();
        let same_email = |id: u64| Employee::new(format!("Dup {}", id), "dup@example.com", "Spain");

        let result = repo.insert_generated(3, &same_email).await;
        assert!(matches!(
            result,
            Err(RepositoryError::ConstraintViolation(_))
        ));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_every_statement_is_counted() {
        let repo = repository();
        repo.insert_generated(3, &generated).await.unwrap();
        assert_eq!(repo.statistics().prepare_statement_count(), 3);

        repo.find_all().await.unwrap();
        repo.find_by_id(1).await.unwrap();
        repo.count().await.unwrap();

        let mut first = repo.find_by_id(1).await.unwrap().unwrap();
        first.name = "Renamed".to_string();
        repo.save(first).await.unwrap();

        let summary = repo.statistics().summary();
        assert_eq!(summary.prepare_statement_count, 8);
        assert_eq!(summary.entity_insert_count, 3);
        assert_eq!(summary.entity_update_count, 1);
        assert_eq!(summary.entity_load_count, 5);
    }
}
