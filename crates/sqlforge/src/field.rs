//! Table-qualified column references.
//!
//! A [`QualifiedField`] names a column, optionally qualified by a table and
//! carrying an advisory alias. Two fields are equal iff their qualified names
//! match; the alias never participates in equality or hashing.

use std::hash::{Hash, Hasher};

/// A table-qualified column reference with an optional alias.
#[derive(Debug, Clone)]
pub struct QualifiedField {
    name: String,
    table: Option<String>,
    alias: Option<String>,
}

/// Parse a dotted name into a field.
///
/// # Example
/// ```ignore
/// let f = sqlforge::field("users.id");
/// assert_eq!(f.qualified_name(), "users.id");
/// ```
pub fn field(name: &str) -> QualifiedField {
    QualifiedField::parse(name)
}

impl QualifiedField {
    /// Parse a dotted name. Everything before the last `.` is the table
    /// qualifier, the final segment is the column; a name without a dot is an
    /// unqualified column. Parsing is total.
    pub fn parse(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((table, column)) => Self {
                name: column.to_string(),
                table: Some(table.to_string()),
                alias: None,
            },
            None => Self {
                name: name.to_string(),
                table: None,
                alias: None,
            },
        }
    }

    /// Construct from an explicit table and column pair.
    pub fn new(table: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            table: Some(table.to_string()),
            alias: None,
        }
    }

    /// Attach an alias, rendered as `AS alias` in result-column position.
    pub fn aliased(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    /// The unqualified column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The table qualifier, if any.
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// The advisory alias, if any.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// `table.column` when a table is present, else the bare column name.
    pub fn qualified_name(&self) -> String {
        match &self.table {
            Some(table) => format!("{table}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

impl PartialEq for QualifiedField {
    fn eq(&self, other: &Self) -> bool {
        self.qualified_name() == other.qualified_name()
    }
}

impl Eq for QualifiedField {}

impl Hash for QualifiedField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualified_name().hash(state);
    }
}

impl From<&str> for QualifiedField {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<String> for QualifiedField {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn parse_unqualified() {
        let f = field("id");
        assert_eq!(f.name(), "id");
        assert_eq!(f.table(), None);
        assert_eq!(f.qualified_name(), "id");
    }

    #[test]
    fn parse_dotted() {
        let f = field("users.id");
        assert_eq!(f.name(), "id");
        assert_eq!(f.table(), Some("users"));
        assert_eq!(f.qualified_name(), "users.id");
    }

    #[test]
    fn parse_three_part_keeps_schema_in_table() {
        let f = field("app.users.id");
        assert_eq!(f.name(), "id");
        assert_eq!(f.table(), Some("app.users"));
        assert_eq!(f.qualified_name(), "app.users.id");
    }

    #[test]
    fn equality_by_qualified_name() {
        assert_eq!(field("users.id"), QualifiedField::new("users", "id"));
        assert_ne!(field("users.id"), field("orders.id"));
    }

    #[test]
    fn alias_excluded_from_equality_and_hash() {
        let plain = field("users.id");
        let aliased = field("users.id").aliased("user_id");
        assert_eq!(plain, aliased);

        let mut set = HashSet::new();
        set.insert(plain);
        assert!(set.contains(&aliased));
    }
}
