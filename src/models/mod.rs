//! Data models for the service layer.

pub mod employee;

pub use employee::Employee;
