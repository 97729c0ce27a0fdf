//! Role resolution — maps semantic column roles to header indices
//!
//! Resolution happens once per run. Names match exactly after trimming and
//! are case-sensitive; the first matching column wins.

use serde::Serialize;

use crate::parser::table::column_index;

/// A semantic column role recognised by the cleaning rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    Number,
    Name,
    Gender,
    Points,
    Birthday,
    Anniversary,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Number,
        Role::Name,
        Role::Gender,
        Role::Points,
        Role::Birthday,
        Role::Anniversary,
    ];

    /// Header name that selects this role
    pub fn column_name(self) -> &'static str {
        match self {
            Role::Number => "Number",
            Role::Name => "Name",
            Role::Gender => "Gender",
            Role::Points => "Points",
            Role::Birthday => "Birthday",
            Role::Anniversary => "Anniversary",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Resolved column index for each role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleColumns {
    pub number: Option<usize>,
    /// True when no column is named `Number` and the first column stands in
    pub number_is_fallback: bool,
    pub name: Option<usize>,
    pub gender: Option<usize>,
    pub points: Option<usize>,
    pub birthday: Option<usize>,
    pub anniversary: Option<usize>,
}

impl RoleColumns {
    pub fn resolve(header: &[String]) -> Self {
        let find = |role: Role| column_index(header, role.column_name());

        let (number, number_is_fallback) = match find(Role::Number) {
            Some(idx) => (Some(idx), false),
            None if !header.is_empty() => (Some(0), true),
            None => (None, false),
        };

        Self {
            number,
            number_is_fallback,
            name: find(Role::Name),
            gender: find(Role::Gender),
            points: find(Role::Points),
            birthday: find(Role::Birthday),
            anniversary: find(Role::Anniversary),
        }
    }

    pub fn get(&self, role: Role) -> Option<usize> {
        match role {
            Role::Number => self.number,
            Role::Name => self.name,
            Role::Gender => self.gender,
            Role::Points => self.points,
            Role::Birthday => self.birthday,
            Role::Anniversary => self.anniversary,
        }
    }
}
