//! INSERT statement node.

use crate::field::QualifiedField;
use crate::value::{ToValue, Value};

/// INSERT statement node.
///
/// Column/value pairs are kept as an insertion-ordered association list so the
/// column list, the placeholder list, and the parameter vector all freeze the
/// same ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub(crate) table: String,
    pub(crate) columns: Vec<(QualifiedField, Option<Value>)>,
}

impl Insert {
    /// Create an INSERT for the given table.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
        }
    }

    /// Set a column value.
    pub fn set(mut self, column: impl Into<QualifiedField>, value: impl ToValue) -> Self {
        self.columns.push((column.into(), Some(value.to_value())));
        self
    }

    /// Set a column to explicit NULL.
    pub fn set_null(mut self, column: impl Into<QualifiedField>) -> Self {
        self.columns.push((column.into(), None));
        self
    }

    /// Set a column value, binding NULL when absent.
    pub fn set_opt(mut self, column: impl Into<QualifiedField>, value: Option<impl ToValue>) -> Self {
        self.columns
            .push((column.into(), value.map(|v| v.to_value())));
        self
    }

    /// The frozen column/value association list.
    pub fn columns(&self) -> &[(QualifiedField, Option<Value>)] {
        &self.columns
    }
}
