mod in_memory_employee_repository;
mod traits;

pub use in_memory_employee_repository::InMemoryEmployeeRepository;
pub use traits::EmployeeRepository;
