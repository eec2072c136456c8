//! Bindable scalar values.
//!
//! The builder binds exactly two scalar kinds: text and binary. Richer native
//! scalars round-trip through their text representation, so `5i64` binds as
//! `Value::Text("5")`. Converting a payload back to a typed scalar fails with
//! a [`SqlError::Conversion`] when the text does not parse.

use crate::error::{SqlError, SqlResult};

/// A bindable scalar value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// UTF-8 text payload.
    Text(String),
    /// Raw byte payload.
    Binary(Vec<u8>),
}

impl Value {
    /// Create a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Create a binary value.
    pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Binary(bytes.into())
    }

    /// Borrow the payload as text.
    pub fn as_str(&self) -> SqlResult<&str> {
        match self {
            Self::Text(s) => Ok(s),
            Self::Binary(b) => std::str::from_utf8(b)
                .map_err(|e| SqlError::conversion(format!("binary payload is not UTF-8: {e}"))),
        }
    }

    /// Borrow the payload as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(s) => s.as_bytes(),
            Self::Binary(b) => b,
        }
    }

    /// Extract a signed integer.
    pub fn to_i64(&self) -> SqlResult<i64> {
        let s = self.as_str()?;
        s.parse::<i64>()
            .map_err(|_| SqlError::conversion(format!("'{s}' does not parse as an integer")))
    }

    /// Extract a float.
    pub fn to_f64(&self) -> SqlResult<f64> {
        let s = self.as_str()?;
        s.parse::<f64>()
            .map_err(|_| SqlError::conversion(format!("'{s}' does not parse as a float")))
    }

    /// Extract a boolean. Accepts `true`/`false` and `1`/`0`.
    pub fn to_bool(&self) -> SqlResult<bool> {
        match self.as_str()? {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(SqlError::conversion(format!(
                "'{other}' does not parse as a boolean"
            ))),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Binary(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

/// Conversion from a native scalar into a bindable [`Value`].
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for &str {
    fn to_value(&self) -> Value {
        Value::Text((*self).to_string())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Text(if *self { "true" } else { "false" }.to_string())
    }
}

macro_rules! impl_to_value_via_display {
    ($($t:ty),* $(,)?) => {
        $(
            impl ToValue for $t {
                fn to_value(&self) -> Value {
                    Value::Text(self.to_string())
                }
            }
        )*
    };
}

impl_to_value_via_display!(i8, i16, i32, i64, isize, u16, u32, u64, usize, f32, f64);
