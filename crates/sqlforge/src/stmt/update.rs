//! UPDATE statement node.

use crate::field::QualifiedField;
use crate::predicate::Predicate;
use crate::value::{ToValue, Value};

/// UPDATE statement node.
///
/// SET parameters always precede predicate parameters in the rendered
/// statement, mirroring the textual SET-before-WHERE order. Without a
/// predicate the statement affects all rows; the builder does not guard
/// against that.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub(crate) table: String,
    pub(crate) values: Vec<(QualifiedField, Option<Value>)>,
    pub(crate) predicate: Option<Predicate>,
}

impl Update {
    /// Create an UPDATE for the given table.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            values: Vec::new(),
            predicate: None,
        }
    }

    /// Set a column value.
    pub fn set(mut self, column: impl Into<QualifiedField>, value: impl ToValue) -> Self {
        self.values.push((column.into(), Some(value.to_value())));
        self
    }

    /// Set a column to explicit NULL.
    pub fn set_null(mut self, column: impl Into<QualifiedField>) -> Self {
        self.values.push((column.into(), None));
        self
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
