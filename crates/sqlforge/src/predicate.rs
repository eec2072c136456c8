//! Boolean predicate trees.
//!
//! Predicates are built bottom-up from comparison methods on
//! [`QualifiedField`] and composed with `&` (AND), `|` (OR) and `!` (NOT).
//! Each application nests exactly one level; same-kind groups are never
//! flattened, and the renderer parenthesizes every AND/OR group so operator
//! precedence survives arbitrary nesting.

use crate::compile::Compile;
use crate::field::QualifiedField;
use crate::param::Parameter;
use crate::value::Value;

/// Comparison operator of an expression node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    /// Left collection contains the right operand; operands swap at render
    /// time into `right IN left`.
    Contains,
    /// Left operand is a member of the right collection: `left IN right`.
    ContainedIn,
}

impl Operator {
    pub(crate) fn sql(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::Contains | Self::ContainedIn => "IN",
        }
    }
}

/// A boolean expression tree used in WHERE-clause positions.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// A single comparison.
    Expression {
        left: Parameter,
        op: Operator,
        right: Parameter,
    },
    /// All members must hold.
    And(Vec<Predicate>),
    /// At least one member must hold.
    Or(Vec<Predicate>),
    /// Negation of the inner predicate.
    Not(Box<Predicate>),
}

impl Predicate {
    /// Construct a comparison node.
    pub fn expression(
        left: impl Into<Parameter>,
        op: Operator,
        right: impl Into<Parameter>,
    ) -> Self {
        Self::Expression {
            left: left.into(),
            op,
            right: right.into(),
        }
    }

    /// AND group from a list of predicates.
    pub fn and(predicates: Vec<Predicate>) -> Self {
        Self::And(predicates)
    }

    /// OR group from a list of predicates.
    pub fn or(predicates: Vec<Predicate>) -> Self {
        Self::Or(predicates)
    }

    /// Negate a predicate.
    pub fn not(predicate: Predicate) -> Self {
        Self::Not(Box::new(predicate))
    }

    /// The bound values of this predicate in exactly the order their
    /// placeholders appear in the rendered text.
    ///
    /// Delegates to the compiler so ordering cannot drift from the rendering
    /// traversal.
    pub fn parameters(&self) -> Vec<Option<Value>> {
        self.compile().parameters
    }
}

impl std::ops::BitAnd for Predicate {
    type Output = Predicate;

    fn bitand(self, rhs: Predicate) -> Predicate {
        Predicate::And(vec![self, rhs])
    }
}

impl std::ops::BitOr for Predicate {
    type Output = Predicate;

    fn bitor(self, rhs: Predicate) -> Predicate {
        Predicate::Or(vec![self, rhs])
    }
}

impl std::ops::Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Predicate {
        Predicate::Not(Box::new(self))
    }
}

/// `member` is contained in `collection`: renders `member IN (...)`.
pub fn contains(collection: impl Into<Parameter>, member: impl Into<Parameter>) -> Predicate {
    Predicate::expression(collection, Operator::Contains, member)
}

// Comparison sugar on fields.
impl QualifiedField {
    /// `field = value` (or `field IS NULL` when the operand is NULL-like).
    pub fn eq(self, rhs: impl Into<Parameter>) -> Predicate {
        Predicate::expression(self, Operator::Equal, rhs)
    }

    /// `field > value`
    pub fn gt(self, rhs: impl Into<Parameter>) -> Predicate {
        Predicate::expression(self, Operator::GreaterThan, rhs)
    }

    /// `field >= value`
    pub fn gte(self, rhs: impl Into<Parameter>) -> Predicate {
        Predicate::expression(self, Operator::GreaterThanOrEqual, rhs)
    }

    /// `field < value`
    pub fn lt(self, rhs: impl Into<Parameter>) -> Predicate {
        Predicate::expression(self, Operator::LessThan, rhs)
    }

    /// `field <= value`
    pub fn lte(self, rhs: impl Into<Parameter>) -> Predicate {
        Predicate::expression(self, Operator::LessThanOrEqual, rhs)
    }

    /// `field IN (values...)` — also accepts a `Select` for `IN (SELECT ...)`.
    pub fn contained_in(self, rhs: impl Into<Parameter>) -> Predicate {
        Predicate::expression(self, Operator::ContainedIn, rhs)
    }

    /// `field IS NULL`
    pub fn is_null(self) -> Predicate {
        Predicate::expression(self, Operator::Equal, Parameter::Null)
    }

    /// `NOT (field IS NULL)`
    pub fn is_not_null(self) -> Predicate {
        Predicate::not(self.is_null())
    }
}
