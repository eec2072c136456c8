//! SELECT statement node.

use crate::field::QualifiedField;
use crate::function::Function;
use crate::predicate::Predicate;
use crate::stmt::join::Join;

/// A renderable fragment of a SELECT's output or source list.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    /// A qualified field, alias rendered as `AS alias` in result position.
    Field(QualifiedField),
    /// A literal SQL fragment (table name, `*`, raw expression).
    Literal(String),
    /// A parenthesized subquery with an optional alias.
    Subquery {
        query: Box<Select>,
        alias: Option<String>,
    },
    /// A function call with an optional alias.
    Function {
        function: Function,
        alias: Option<String>,
    },
}

/// Ordering direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One ORDER BY entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: QualifiedField,
    pub direction: Direction,
}

/// SELECT statement node.
///
/// All builder methods consume and return the statement; a shared value is
/// cloned first, never mutated in place. With no output components the
/// statement renders `SELECT *`.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub(crate) fields: Vec<Component>,
    pub(crate) sources: Vec<Component>,
    pub(crate) joins: Vec<Join>,
    pub(crate) predicate: Option<Predicate>,
    pub(crate) order: Vec<OrderBy>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
}

impl Select {
    /// SELECT from a table.
    pub fn new(table: &str) -> Self {
        Self {
            fields: Vec::new(),
            sources: vec![Component::Literal(table.to_string())],
            joins: Vec::new(),
            predicate: None,
            order: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// SELECT from a parenthesized subquery with an alias.
    pub fn from_subquery(query: Select, alias: &str) -> Self {
        Self {
            fields: Vec::new(),
            sources: vec![Component::Subquery {
                query: Box::new(query),
                alias: Some(alias.to_string()),
            }],
            joins: Vec::new(),
            predicate: None,
            order: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    // ==================== Output components ====================

    /// Append a result column.
    pub fn field(mut self, field: impl Into<QualifiedField>) -> Self {
        self.fields.push(Component::Field(field.into()));
        self
    }

    /// Append several result columns.
    pub fn fields<F: Into<QualifiedField>>(mut self, fields: impl IntoIterator<Item = F>) -> Self {
        self.fields
            .extend(fields.into_iter().map(|f| Component::Field(f.into())));
        self
    }

    /// Append a literal SQL fragment as a result column.
    pub fn literal(mut self, sql: &str) -> Self {
        self.fields.push(Component::Literal(sql.to_string()));
        self
    }

    /// Append a subquery result column, optionally aliased.
    pub fn subquery(mut self, query: Select, alias: Option<&str>) -> Self {
        self.fields.push(Component::Subquery {
            query: Box::new(query),
            alias: alias.map(str::to_string),
        });
        self
    }

    /// Append a function-call result column, optionally aliased.
    pub fn function(mut self, function: Function, alias: Option<&str>) -> Self {
        self.fields.push(Component::Function {
            function,
            alias: alias.map(str::to_string),
        });
        self
    }

    /// Replace the output list with `COUNT(*)`.
    pub fn count(mut self) -> Self {
        self.fields = vec![Component::Function {
            function: Function::count_all(),
            alias: None,
        }];
        self
    }

    // ==================== Sources, joins, predicate ====================

    /// Append an additional source table.
    pub fn source(mut self, table: &str) -> Self {
        self.sources.push(Component::Literal(table.to_string()));
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

    /// Append a join clause.
    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    // ==================== Ordering & pagination ====================

    /// Append an ORDER BY entry.
    pub fn order_by(mut self, field: impl Into<QualifiedField>, direction: Direction) -> Self {
        self.order.push(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    /// Set LIMIT.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET.
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }
}
