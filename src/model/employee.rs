use serde::{Deserialize, Serialize};

/// An entry in the employee directory. Tasks only ever hold its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, rename = "avatar")]
    pub avatar_url: String,
}

impl Employee {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            avatar_url: String::new(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Two-letter initials, used where an avatar image is unavailable.
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .collect::<String>()
            .to_uppercase()
    }
}

/// Read-only employee directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster(Vec<Employee>);

impl Roster {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self(employees)
    }

    pub fn resolve(&self, id: &str) -> Option<&Employee> {
        self.0.iter().find(|e| e.id == id)
    }

    /// Display name for an assignee, or "Unassigned" when the id is unknown.
    pub fn display_name(&self, id: &str) -> String {
        self.resolve(id)
            .map(Employee::full_name)
            .unwrap_or_else(|| "Unassigned".to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Employee> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_assignee_is_unassigned() {
        let roster = Roster::new(vec![Employee::new("EMP001", "Ada", "Lovelace")]);
        assert_eq!(roster.display_name("EMP001"), "Ada Lovelace");
        assert_eq!(roster.display_name("EMP404"), "Unassigned");
        assert_eq!(roster.resolve("EMP001").map(Employee::initials).as_deref(), Some("AL"));
    }
}
