//! Typed join clauses.

use crate::field::QualifiedField;

/// Join flavor, carrying the joined table name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinKind {
    Inner(String),
    Outer(String),
    Left(String),
    Right(String),
}

impl JoinKind {
    pub(crate) fn keyword(&self) -> &'static str {
        match self {
            Self::Inner(_) => "INNER",
            Self::Outer(_) => "OUTER",
            Self::Left(_) => "LEFT",
            Self::Right(_) => "RIGHT",
        }
    }

    pub(crate) fn table(&self) -> &str {
        match self {
            Self::Inner(t) | Self::Outer(t) | Self::Left(t) | Self::Right(t) => t,
        }
    }
}

/// A join clause: `<TYPE> JOIN <table> ON <left_key> = <right_key>`.
///
/// Joins contribute no bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub left_key: QualifiedField,
    pub right_key: QualifiedField,
}

impl Join {
    pub fn new(kind: JoinKind, left_key: QualifiedField, right_key: QualifiedField) -> Self {
        Self {
            kind,
            left_key,
            right_key,
        }
    }

    /// INNER JOIN.
    pub fn inner(table: &str, left_key: QualifiedField, right_key: QualifiedField) -> Self {
        Self::new(JoinKind::Inner(table.to_string()), left_key, right_key)
    }

    /// OUTER JOIN.
    pub fn outer(table: &str, left_key: QualifiedField, right_key: QualifiedField) -> Self {
        Self::new(JoinKind::Outer(table.to_string()), left_key, right_key)
    }

    /// LEFT JOIN.
    pub fn left(table: &str, left_key: QualifiedField, right_key: QualifiedField) -> Self {
        Self::new(JoinKind::Left(table.to_string()), left_key, right_key)
    }

    /// RIGHT JOIN.
    pub fn right(table: &str, left_key: QualifiedField, right_key: QualifiedField) -> Self {
        Self::new(JoinKind::Right(table.to_string()), left_key, right_key)
    }
}
