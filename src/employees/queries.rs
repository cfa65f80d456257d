//! Derived queries computed over a fetched employee list.

use crate::employees::model::Employee;

/// Employees whose name contains `fragment`, ignoring case, in input order.
///
/// An empty fragment matches everyone.
pub fn filter_by_name(employees: Vec<Employee>, fragment: &str) -> Vec<Employee> {
    let needle = fragment.to_lowercase();
    employees
        .into_iter()
        .filter(|e| e.name.to_lowercase().contains(&needle))
        .collect()
}

/// Highest salary in the list, `0` when empty.
pub fn highest_salary(employees: &[Employee]) -> u64 {
    employees.iter().map(|e| e.salary).max().unwrap_or(0)
}

/// Names of the `n` best paid employees, highest first.
///
/// Equal salaries keep their input order.
pub fn top_earning_names(mut employees: Vec<Employee>, n: usize) -> Vec<String> {
    // sort_by is stable
    employees.sort_by(|a, b| b.salary.cmp(&a.salary));
    employees.into_iter().take(n).map(|e| e.name).collect()
}
