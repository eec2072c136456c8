//! Placeholder and clause dialects.
//!
//! The compiler is dialect-agnostic; a [`Dialect`] decides the placeholder
//! marker text and the spelling/order of pagination clauses. The parameter
//! vector is unaffected by the dialect — only the rendered text varies.

/// Dialect-specific rendering hooks.
pub trait Dialect {
    /// Marker for the `index`-th bound parameter (1-based). The index climbs
    /// across the whole statement, subqueries included.
    fn placeholder(&self, index: usize) -> String;

    /// Render the pagination clauses, only for the parts that are set.
    ///
    /// The default emits `LIMIT n` before `OFFSET n`.
    fn limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        let mut out = String::new();
        if let Some(n) = limit {
            out.push_str(&format!("LIMIT {n}"));
        }
        if let Some(n) = offset {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&format!("OFFSET {n}"));
        }
        out
    }
}

/// Driver-neutral dialect using `%@` markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Generic;

impl Dialect for Generic {
    fn placeholder(&self, _index: usize) -> String {
        "%@".to_string()
    }
}

/// PostgreSQL dialect using numbered `$n` markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Dialect for Postgres {
    fn placeholder(&self, index: usize) -> String {
        format!("${index}")
    }
}

/// SQLite dialect using positional `?` markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }
}
