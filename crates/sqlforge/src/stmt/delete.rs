//! DELETE statement node.

use crate::predicate::Predicate;

/// DELETE statement node.
///
/// Parameters are exactly the predicate's parameters, or empty when no
/// predicate is set. A predicate-less DELETE renders without WHERE and
/// affects all rows; callers opt into that by not filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub(crate) table: String,
    pub(crate) predicate: Option<Predicate>,
}

impl Delete {
    /// Create a DELETE for the given table.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            predicate: None,
        }
    }

    /// Add a WHERE predicate; an existing predicate is AND-combined.
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(match self.predicate.take() {
            Some(existing) => existing & predicate,
            None => predicate,
        });
        self
    }
}
