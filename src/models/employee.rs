//! Employee model managed by the service layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An employee row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Employee {
    /// Identifier assigned by the repository (0 until saved)
    pub id: u64,

    pub name: String,

    pub email: String,

    pub country: String,

    /// Soft-delete marker
    #[serde(rename = "isDeleted")]
    pub is_deleted: bool,
}

impl Employee {
    /// Create an unsaved employee.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            country: country.into(),
            is_deleted: false,
        }
    }

    /// CSV row in `id,name,email,country` order.
    pub fn to_csv_row(&self) -> String {
        format!("{},{},{},{}", self.id, self.name, self.email, self.country)
    }
}

/// Renders as compact JSON.
impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

crate::summarize_as_display!(Employee);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interception::summary::summarize;

    #[test]
    fn test_employee_display_is_json() {
        let mut employee = Employee::new("Ann", "ann@example.com", "Ukraine");
        employee.id = 3;
        assert_eq!(
            employee.to_string(),
            r#"{"id":3,"name":"Ann","email":"ann@example.com","country":"Ukraine","isDeleted":false}"#
        );
    }

    #[test]
    fn test_employee_summary_uses_display() {
        let employee = Employee::new("Ann", "ann@example.com", "Ukraine");
        let summary = summarize(&employee).unwrap().unwrap();
        assert!(summary.as_str().contains("\"name\":\"Ann\""));
    }

    #[test]
    fn test_employee_deserializes_with_defaults() {
        let employee: Employee = serde_json::from_str(r#"{"name":"Bo"}"#).unwrap();
        assert_eq!(employee.name, "Bo");
        assert_eq!(employee.id, 0);
        assert!(!employee.is_deleted);
    }

    #[test]
    fn test_csv_row() {
        let mut employee = Employee::new("Ann", "ann@example.com", "Ukraine");
        employee.id = 1;
        assert_eq!(employee.to_csv_row(), "1,Ann,ann@example.com,Ukraine");
    }
}
