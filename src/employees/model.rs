//! Employee records and the shapes they travel in.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::employees::error::{EmployeeError, EmployeeResult};

/// One employee record as served by upstream.
///
/// Serializes with the `employee_*` keys; deserializes from either those or the
/// short `name`/`salary`/`age` keys the upstream create endpoint echoes back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Assigned by upstream; absent until the record exists there.
    #[serde(default)]
    pub id: Option<u64>,

    #[serde(rename = "employee_name", alias = "name")]
    pub name: String,

    #[serde(rename = "employee_salary", alias = "salary", deserialize_with = "lenient_number")]
    pub salary: u64,

    #[serde(rename = "employee_age", alias = "age", deserialize_with = "lenient_number")]
    pub age: u32,

    /// Passed through untouched when upstream supplies it.
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// Upstream's `{status, data}` wrapper around every payload.
///
/// Only `data` is consulted; success is decided by the HTTP status.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub status: Option<String>,
    pub data: Option<T>,
    pub message: Option<String>,
}

/// An integer that may arrive as a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
    Number(i64),
    Text(String),
}

impl NumericValue {
    /// Resolve to an integer, naming `field` in the error.
    pub fn parse(&self, field: &str) -> EmployeeResult<i64> {
        match self {
            NumericValue::Number(n) => Ok(*n),
            NumericValue::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| EmployeeError::invalid(format!("{} must be a valid integer", field))),
        }
    }
}

fn lenient_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let value = NumericValue::deserialize(deserializer)?;
    let n = value.parse("number").map_err(D::Error::custom)?;
    T::try_from(n).map_err(|_| D::Error::custom(format!("{} is out of range", n)))
}

/// Body accepted by the local create endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployeeRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub salary: NumericValue,
    pub age: NumericValue,
}

impl CreateEmployeeRequest {
    /// Resolve numeric fields, failing on the first one that does not parse.
    pub fn into_fields(self) -> EmployeeResult<(String, i64, i64)> {
        let salary = self.salary.parse("salary")?;
        let age = self.age.parse("age")?;
        Ok((self.name.unwrap_or_default(), salary, age))
    }
}

/// A validated employee ready to be created upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewEmployee {
    pub name: String,
    pub salary: u64,
    pub age: u32,
}

impl NewEmployee {
    pub fn new(name: &str, salary: i64, age: i64) -> EmployeeResult<Self> {
        if name.trim().is_empty() {
            return Err(EmployeeError::invalid("Name cannot be empty"));
        }
        let salary = u64::try_from(salary)
            .map_err(|_| EmployeeError::invalid("Salary must be greater than or equal to 0"))?;
        if age < 0 {
            return Err(EmployeeError::invalid("Age must be greater than or equal to 0"));
        }
        let age = u32::try_from(age).map_err(|_| EmployeeError::invalid("Age is out of range"))?;

        Ok(Self {
            name: name.to_string(),
            salary,
            age,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_list_envelope() {
        let body = r#"{
            "status": "success",
            "data": [
                {"id": 1, "employee_name": "Tiger Nixon", "employee_salary": 320800, "employee_age": 61, "profile_image": ""},
                {"id": 2, "employee_name": "Garrett Winters", "employee_salary": "170750", "employee_age": "63"}
            ]
        }"#;
        let envelope: Envelope<Vec<Employee>> = serde_json::from_str(body).unwrap();
        let data = envelope.data.unwrap();

        assert_eq!(envelope.status.as_deref(), Some("success"));
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].profile_image.as_deref(), Some(""));
        assert_eq!(data[1].salary, 170750);
        assert_eq!(data[1].age, 63);
        assert_eq!(data[1].profile_image, None);
    }

    #[test]
    fn test_decode_create_echo_with_short_keys() {
        let body = r#"{"status":"success","data":{"name":"test","salary":"123","age":"23","id":25}}"#;
        let envelope: Envelope<Employee> = serde_json::from_str(body).unwrap();
        let employee = envelope.data.unwrap();

        assert_eq!(employee.id, Some(25));
        assert_eq!(employee.name, "test");
        assert_eq!(employee.salary, 123);
        assert_eq!(employee.age, 23);
    }

    #[test]
    fn test_null_data_decodes_as_absent() {
        let envelope: Envelope<Employee> =
            serde_json::from_str(r#"{"status":"success","data":null}"#).unwrap();
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_negative_upstream_salary_is_rejected() {
        let body = r#"{"employee_name":"x","employee_salary":-1,"employee_age":30}"#;
        assert!(serde_json::from_str::<Employee>(body).is_err());
    }

    #[test]
    fn test_serializes_with_employee_keys() {
        let employee = Employee {
            id: Some(7),
            name: "Jane Doe".to_string(),
            salary: 60000,
            age: 28,
            profile_image: None,
        };
        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["employee_name"], "Jane Doe");
        assert_eq!(json["employee_salary"], 60000);
        assert_eq!(json["employee_age"], 28);
        assert_eq!(json["id"], 7);
    }

    #[test]
    fn test_new_employee_validation() {
        let err = NewEmployee::new("", 50000, 30).unwrap_err();
        assert_eq!(err.to_string(), "Name cannot be empty");

        let err = NewEmployee::new("   ", 50000, 30).unwrap_err();
        assert_eq!(err.to_string(), "Name cannot be empty");

        let err = NewEmployee::new("John Doe", -50000, 30).unwrap_err();
        assert_eq!(err.to_string(), "Salary must be greater than or equal to 0");

        let err = NewEmployee::new("John Doe", 50000, -30).unwrap_err();
        assert_eq!(err.to_string(), "Age must be greater than or equal to 0");

        let ok = NewEmployee::new("John Doe", 0, 0).unwrap();
        assert_eq!(ok.salary, 0);
    }

    #[test]
    fn test_new_employee_wire_shape() {
        let json = serde_json::to_value(NewEmployee::new("John Doe", 50000, 30).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"name": "John Doe", "salary": 50000, "age": 30}));
    }

    #[test]
    fn test_create_request_accepts_numeric_strings() {
        let request: CreateEmployeeRequest =
            serde_json::from_str(r#"{"name":"John","salary":"50000","age":30}"#).unwrap();
        assert_eq!(request.into_fields().unwrap(), ("John".to_string(), 50000, 30));
    }

    #[test]
    fn test_create_request_rejects_non_numeric_string() {
        let request: CreateEmployeeRequest =
            serde_json::from_str(r#"{"name":"John","salary":"lots","age":30}"#).unwrap();
        let err = request.into_fields().unwrap_err();
        assert!(matches!(err, EmployeeError::InvalidArgument(_)));
        assert_eq!(err.to_string(), "salary must be a valid integer");
    }
}
