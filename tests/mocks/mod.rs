pub mod mock_employee_repository;
pub mod mock_query_statistics;

#[allow(unused_imports)]
pub use mock_employee_repository::MockEmployeeRepository;
#[allow(unused_imports)]
pub use mock_query_statistics::MockQueryStatistics;
