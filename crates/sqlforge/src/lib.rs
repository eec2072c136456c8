//! # sqlforge
//!
//! A database-agnostic SQL statement builder.
//!
//! Statements are immutable value trees rendered into SQL text plus an
//! ordered parameter vector; execution belongs to a [`Connection`]
//! implementation supplied by the caller.
//!
//! ## Features
//!
//! - **Typed statements**: `Select`/`Insert`/`Update`/`Delete` nodes built
//!   with chainable, copy-returning methods
//! - **Predicate trees**: comparisons composed with `&`, `|` and `!`,
//!   rendered with explicit parentheses so precedence never surprises
//! - **Ordered parameters**: placeholder order and parameter order always
//!   agree, subqueries included
//! - **Pluggable dialects**: placeholder markers and pagination clauses vary
//!   per target database, the tree does not
//! - **Migrations**: a directory-driven, version-stepping runner layered on
//!   the same connection contract
//!
//! ## Building statements
//!
//! ```
//! use sqlforge::{Compile, field, select};
//!
//! let stmt = select("users")
//!     .filter(field("status").eq("active") & field("age").gt(18))
//!     .limit(10)
//!     .compile();
//!
//! assert_eq!(
//!     stmt.text,
//!     "SELECT * FROM users WHERE (status = %@ AND age > %@) LIMIT 10"
//! );
//! assert_eq!(stmt.parameters.len(), 2);
//! ```
//!
//! ## Writing rows
//!
//! ```
//! use sqlforge::{Compile, Postgres, field, insert, update};
//!
//! let stmt = insert("users").set("id", 1).set("name", "Ann").compile();
//! assert_eq!(stmt.text, "INSERT INTO users (id, name) VALUES (%@, %@)");
//!
//! let stmt = update("users")
//!     .set("status", "inactive")
//!     .filter(field("id").eq(1))
//!     .compile_with(&Postgres);
//! assert_eq!(stmt.text, "UPDATE users SET status = $1 WHERE id = $2");
//! ```

pub mod compile;
pub mod connection;
pub mod dialect;
pub mod error;
pub mod field;
pub mod function;
pub mod migrate;
pub mod param;
pub mod predicate;
pub mod stmt;
pub mod value;

pub use compile::{Compile, Statement};
pub use connection::{Connection, Row, with_transaction};
pub use dialect::{Dialect, Generic, Postgres, Sqlite};
pub use error::{SqlError, SqlResult};
pub use field::{QualifiedField, field};
pub use function::Function;
pub use migrate::{MIGRATION_TABLE, Migration, Migrator};
pub use param::Parameter;
pub use predicate::{Operator, Predicate, contains};
pub use stmt::{
    Component, Delete, Direction, Insert, Join, JoinKind, OrderBy, Select, Update, delete, insert,
    select, update,
};
