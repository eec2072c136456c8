//! Error types for sqlforge

use thiserror::Error;

/// Result type alias for sqlforge operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Error types for statement building and the execution boundary
#[derive(Debug, Error)]
pub enum SqlError {
    /// Value conversion error (byte payload does not parse as the requested scalar)
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// Database connection error (reported by the execution layer)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Statement execution error (reported by the execution layer)
    #[error("Execution error: {0}")]
    Execution(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),
}

impl SqlError {
    /// Create a conversion error
    pub fn conversion(message: impl Into<String>) -> Self {
        Self::Conversion(message.into())
    }

    /// Create a migration error
    pub fn migration(message: impl Into<String>) -> Self {
        Self::Migration(message.into())
    }

    /// Check if this is a conversion error
    pub fn is_conversion(&self) -> bool {
        matches!(self, Self::Conversion(_))
    }

    /// Check if this is a migration error
    pub fn is_migration(&self) -> bool {
        matches!(self, Self::Migration(_))
    }
}
