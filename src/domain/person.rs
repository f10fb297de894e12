//! Person - sample row type for the demo binary and tests

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::filter::FilterValue;
use super::row::GridRow;

const STATUSES: [&str; 3] = ["active", "inactive", "pending"];
const DEPARTMENTS: [&str; 5] = ["Engineering", "Sales", "Marketing", "HR", "Finance"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub status: String,
    pub salary: u32,
    pub department: String,
    pub start_date: Option<NaiveDate>,
    pub is_manager: bool,
}

impl Person {
    /// Deterministic sample person for position `i`
    pub fn sample(i: usize) -> Self {
        let n = i as u32;
        Self {
            id: n + 1,
            name: format!("Person {}", n + 1),
            email: format!("person{}@example.com", n + 1),
            age: 22 + n % 45,
            status: STATUSES[i % STATUSES.len()].to_string(),
            salary: 40_000 + (n % 2000) * 40,
            department: DEPARTMENTS[i % DEPARTMENTS.len()].to_string(),
            start_date: NaiveDate::from_ymd_opt(2020 + (i % 4) as i32, (n % 12) + 1, (n % 28) + 1),
            is_manager: i % 7 == 0,
        }
    }
}

/// Generate `count` sample people
pub fn sample_people(count: usize) -> Vec<Person> {
    (0..count).map(Person::sample).collect()
}

impl GridRow for Person {
    fn cell(&self, column: &str) -> FilterValue {
        match column {
            "id" => FilterValue::Number(f64::from(self.id)),
            "name" => FilterValue::Text(self.name.clone()),
            "email" => FilterValue::Text(self.email.clone()),
            "age" => FilterValue::Number(f64::from(self.age)),
            "status" => FilterValue::Text(self.status.clone()),
            "salary" => FilterValue::Number(f64::from(self.salary)),
            "department" => FilterValue::Text(self.department.clone()),
            "startDate" => self.start_date.into(),
            "isManager" => FilterValue::Bool(self.is_manager),
            _ => FilterValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_people() {
        let people = sample_people(10);
        assert_eq!(people.len(), 10);
        assert_eq!(people[0].name, "Person 1");
        assert_eq!(people[0].age, 22);
        assert!(people[0].is_manager);
        assert_eq!(people[1].status, "inactive");
        assert!(people.iter().all(|p| p.start_date.is_some()));
    }

    #[test]
    fn test_cells() {
        let p = Person::sample(0);
        assert_eq!(p.cell("age"), FilterValue::Number(22.0));
        assert_eq!(p.cell("missing"), FilterValue::Null);
    }
}
