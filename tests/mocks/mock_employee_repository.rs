use async_trait::async_trait;
use service_call_logger::error::{RepositoryError, RepositoryResult};
use service_call_logger::models::Employee;
use service_call_logger::repositories::EmployeeRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock employee repository for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockEmployeeRepository {
    employees: Arc<Mutex<HashMap<u64, Employee>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    failing: Arc<Mutex<bool>>,
    delay: Arc<Mutex<Option<Duration>>>,
}

#[allow(dead_code)]
impl MockEmployeeRepository {
    pub fn new() -> Self {
        Self {
            employees: Arc::new(Mutex::new(HashMap::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            failing: Arc::new(Mutex::new(false)),
            delay: Arc::new(Mutex::new(None)),
        }
    }

    pub fn add_employee(&self, employee: Employee) {
        let mut employees = self.employees.lock().unwrap();
        employees.insert(employee.id, employee);
    }

    pub fn add_employees(&self, list: Vec<Employee>) {
        let mut employees = self.employees.lock().unwrap();
        for employee in list {
            employees.insert(employee.id, employee);
        }
    }

    /// Make every subsequent call fail with `RepositoryError::Unavailable`.
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    /// Delay `find_by_id` calls, to overlap concurrent requests.
    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock().unwrap() = delay;
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) -> RepositoryResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        if *self.failing.lock().unwrap() {
            return Err(RepositoryError::Unavailable);
        }
        Ok(())
    }
}

impl Default for MockEmployeeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmployeeRepository for MockEmployeeRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Employee>> {
        self.track_call("find_all")?;
        let employees = self.employees.lock().unwrap();
        let mut result: Vec<Employee> = employees.values().cloned().collect();
        result.sort_by_key(|e| e.id);
        Ok(result)
    }

    async fn find_by_id(&self, id: u64) -> RepositoryResult<Option<Employee>> {
        self.track_call("find_by_id")?;
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let employees = self.employees.lock().unwrap();
        Ok(employees.get(&id).cloned())
    }

    async fn find_by_country(&self, country: &str) -> RepositoryResult<Vec<Employee>> {
        self.track_call("find_by_country")?;
        let employees = self.employees.lock().unwrap();
        Ok(employees
            .values()
            .filter(|e| e.country.eq_ignore_ascii_case(country))
            .cloned()
            .collect())
    }

    async fn save(&self, mut employee: Employee) -> RepositoryResult<Employee> {
        self.track_call("save")?;
        let mut employees = self.employees.lock().unwrap();
        if employee.id == 0 {
            employee.id = employees.keys().max().copied().unwrap_or(0) + 1;
        }
        employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn insert_generated(
        &self,
        count: usize,
        generate: &(dyn Fn(u64) -> Employee + Send + Sync),
    ) -> RepositoryResult<Vec<Employee>> {
        self.track_call("insert_generated")?;
        let mut employees = self.employees.lock().unwrap();
        let first_id = employees.keys().max().copied().unwrap_or(0) + 1;
        let batch: Vec<Employee> = (first_id..first_id + count as u64)
            .map(|id| Employee { id, ..generate(id) })
            .collect();

        for (i, employee) in batch.iter().enumerate() {
            let duplicate = employees.values().any(|e| e.email == employee.email)
                || batch[..i].iter().any(|e| e.email == employee.email);
            if duplicate {
                return Err(RepositoryError::ConstraintViolation(format!(
                    "email {} already exists",
                    employee.email
                )));
            }
        }

        for employee in &batch {
            employees.insert(employee.id, employee.clone());
        }
        Ok(batch)
    }

    async fn count(&self) -> RepositoryResult<usize> {
        self.track_call("count")?;
        Ok(self.employees.lock().unwrap().len())
    }
}
