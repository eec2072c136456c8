//! Predicate operands.
//!
//! [`Parameter`] is the unit predicates operate on: a field reference, a
//! literal value, a list of values, a function call, a nested query, or NULL.
//! The `Query` variant allows a subquery anywhere a value is expected.

use crate::field::QualifiedField;
use crate::function::Function;
use crate::stmt::Select;
use crate::value::{ToValue, Value};

/// Anything that can appear on either side of a predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    /// A column reference.
    Field(QualifiedField),
    /// A single bound value (`None` binds as NULL).
    Value(Option<Value>),
    /// A list of bound values, rendered as a parenthesized placeholder list.
    Values(Vec<Option<Value>>),
    /// A function call.
    Function(Function),
    /// A nested query, rendered parenthesized with its parameters inlined in
    /// traversal order.
    Query(Box<Select>),
    /// Explicit NULL.
    Null,
}

impl Parameter {
    /// Wrap a native scalar as a bound value.
    pub fn value(v: impl ToValue) -> Self {
        Self::Value(Some(v.to_value()))
    }

    /// Wrap a list of native scalars as a bound value list.
    pub fn values<T: ToValue>(vs: &[T]) -> Self {
        Self::Values(vs.iter().map(|v| Some(v.to_value())).collect())
    }

    /// Whether this operand is NULL-like (`Null` or an absent value).
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null | Self::Value(None))
    }
}

impl From<QualifiedField> for Parameter {
    fn from(f: QualifiedField) -> Self {
        Self::Field(f)
    }
}

impl From<Value> for Parameter {
    fn from(v: Value) -> Self {
        Self::Value(Some(v))
    }
}

impl From<Option<Value>> for Parameter {
    fn from(v: Option<Value>) -> Self {
        Self::Value(v)
    }
}

impl From<Function> for Parameter {
    fn from(f: Function) -> Self {
        Self::Function(f)
    }
}

impl From<Select> for Parameter {
    fn from(query: Select) -> Self {
        Self::Query(Box::new(query))
    }
}

impl<T: ToValue> From<Vec<T>> for Parameter {
    fn from(vs: Vec<T>) -> Self {
        Self::Values(vs.into_iter().map(|v| Some(v.to_value())).collect())
    }
}

macro_rules! impl_from_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Parameter {
                fn from(v: $t) -> Self {
                    Self::Value(Some(v.to_value()))
                }
            }
        )*
    };
}

impl_from_scalar!(i8, i16, i32, i64, isize, u16, u32, u64, usize, f32, f64, bool, &str, String);
