//! Statement nodes for the four statement kinds.
//!
//! Each node is an immutable tree: builder methods consume the node and
//! return a modified copy, so values can be shared and rendered concurrently
//! without synchronization.
//!
//! # Usage
//!
//! ```ignore
//! use sqlforge::{field, select, insert, update, delete, Compile, Direction};
//!
//! let stmt = select("users")
//!     .filter(field("id").gt(10))
//!     .order_by(field("created_at"), Direction::Desc)
//!     .limit(5)
//!     .compile();
//!
//! let stmt = insert("users").set("id", 1).set("name", "Ann").compile();
//!
//! let stmt = update("users").set("status", "inactive").filter(field("id").eq(1)).compile();
//!
//! let stmt = delete("users").filter(field("id").eq(1)).compile();
//! ```

mod delete;
mod insert;
mod join;
mod select;
mod update;

pub use delete::Delete;
pub use insert::Insert;
pub use join::{Join, JoinKind};
pub use select::{Component, Direction, OrderBy, Select};
pub use update::Update;

/// Create a SELECT statement for the given table.
pub fn select(table: &str) -> Select {
    Select::new(table)
}

/// Create an INSERT statement for the given table.
pub fn insert(table: &str) -> Insert {
    Insert::new(table)
}

/// Create an UPDATE statement for the given table.
pub fn update(table: &str) -> Update {
    Update::new(table)
}

/// Create a DELETE statement for the given table.
pub fn delete(table: &str) -> Delete {
    Delete::new(table)
}
