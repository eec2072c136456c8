//! SQL function calls.

use crate::field::field;
use crate::param::Parameter;

/// A function call usable as a predicate operand or result column.
///
/// Rendered as `NAME(arg, arg, ...)`; value arguments become placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    name: String,
    arguments: Vec<Parameter>,
}

impl Function {
    /// Create a function call.
    pub fn new(name: &str, arguments: Vec<Parameter>) -> Self {
        Self {
            name: name.to_string(),
            arguments,
        }
    }

    /// `COUNT(argument)`.
    pub fn count(argument: impl Into<Parameter>) -> Self {
        Self::new("COUNT", vec![argument.into()])
    }

    /// `COUNT(*)`.
    pub fn count_all() -> Self {
        Self::new("COUNT", vec![field("*").into()])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &[Parameter] {
        &self.arguments
    }
}
