//! Execution boundary.
//!
//! The builder never talks to a database itself; it hands a rendered
//! [`Statement`] to a [`Connection`] implementation. The trait is the narrow
//! contract an execution layer must satisfy: statement execution plus
//! transaction control. Everything else (sockets, pooling, retries) lives on
//! the implementor's side.

use crate::compile::Statement;
use crate::dialect::{Dialect, Generic};
use crate::error::{SqlError, SqlResult};
use crate::value::Value;

/// One result row: column values in result-column order, NULL as `None`.
pub type Row = Vec<Option<Value>>;

/// A database connection capable of executing rendered statements.
///
/// `begin`/`commit`/`rollback` and the savepoint methods default to plain SQL
/// commands; implementors with a native transaction API should override them.
pub trait Connection {
    /// Execute SQL text with bound parameters and return the result rows.
    fn execute(&mut self, text: &str, parameters: &[Option<Value>]) -> SqlResult<Vec<Row>>;

    /// The dialect statements should be rendered with for this connection.
    fn dialect(&self) -> &dyn Dialect {
        &Generic
    }

    /// Execute a rendered statement.
    fn run(&mut self, statement: &Statement) -> SqlResult<Vec<Row>> {
        self.execute(&statement.text, &statement.parameters)
    }

    fn begin(&mut self) -> SqlResult<()> {
        self.execute("BEGIN", &[]).map(|_| ())
    }

    fn commit(&mut self) -> SqlResult<()> {
        self.execute("COMMIT", &[]).map(|_| ())
    }

    fn rollback(&mut self) -> SqlResult<()> {
        self.execute("ROLLBACK", &[]).map(|_| ())
    }

    fn savepoint(&mut self, name: &str) -> SqlResult<()> {
        let name = checked_identifier(name)?;
        self.execute(&format!("SAVEPOINT {name}"), &[]).map(|_| ())
    }

    fn release_savepoint(&mut self, name: &str) -> SqlResult<()> {
        let name = checked_identifier(name)?;
        self.execute(&format!("RELEASE SAVEPOINT {name}"), &[])
            .map(|_| ())
    }

    fn rollback_to_savepoint(&mut self, name: &str) -> SqlResult<()> {
        let name = checked_identifier(name)?;
        self.execute(&format!("ROLLBACK TO SAVEPOINT {name}"), &[])
            .map(|_| ())
    }
}

/// Savepoint names are spliced into SQL text, so they must be plain
/// identifiers.
fn checked_identifier(name: &str) -> SqlResult<&str> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(SqlError::Execution(format!(
            "invalid savepoint name: {name:?}"
        )));
    }
    Ok(name)
}

/// Run `operation` inside a transaction.
///
/// Commits on `Ok`, rolls back on `Err`. When the rollback itself fails the
/// returned error carries both failures.
pub fn with_transaction<C, T, F>(conn: &mut C, operation: F) -> SqlResult<T>
where
    C: Connection + ?Sized,
    F: FnOnce(&mut C) -> SqlResult<T>,
{
    conn.begin()?;
    match operation(conn) {
        Ok(value) => {
            conn.commit()?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = conn.rollback() {
                tracing::warn!(error = %rollback_err, "rollback failed");
                return Err(SqlError::Execution(format!(
                    "{err} (rollback also failed: {rollback_err})"
                )));
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every SQL string it is asked to execute.
    struct RecordingConnection {
        log: Vec<String>,
        fail_on: Option<&'static str>,
    }

    impl RecordingConnection {
        fn new() -> Self {
            Self {
                log: Vec::new(),
                fail_on: None,
            }
        }
    }

    impl Connection for RecordingConnection {
        fn execute(&mut self, text: &str, _parameters: &[Option<Value>]) -> SqlResult<Vec<Row>> {
            if self.fail_on == Some(text) {
                return Err(SqlError::Execution(format!("refused: {text}")));
            }
            self.log.push(text.to_string());
            Ok(Vec::new())
        }
    }

    #[test]
    fn transaction_commits_on_ok() {
        let mut conn = RecordingConnection::new();
        let result = with_transaction(&mut conn, |c| {
            c.execute("UPDATE users SET x = %@", &[Some(Value::text("1"))])?;
            Ok(42)
        });
        assert_eq!(result.ok(), Some(42));
        assert_eq!(conn.log, vec!["BEGIN", "UPDATE users SET x = %@", "COMMIT"]);
    }

    #[test]
    fn transaction_rolls_back_on_err() {
        let mut conn = RecordingConnection::new();
        let result: SqlResult<()> =
            with_transaction(&mut conn, |_| Err(SqlError::Execution("boom".into())));
        assert!(result.is_err());
        assert_eq!(conn.log, vec!["BEGIN", "ROLLBACK"]);
    }

    #[test]
    fn failed_rollback_combines_errors() {
        let mut conn = RecordingConnection::new();
        conn.fail_on = Some("ROLLBACK");
        let result: SqlResult<()> =
            with_transaction(&mut conn, |_| Err(SqlError::Execution("boom".into())));
        let message = result.expect_err("must fail").to_string();
        assert!(message.contains("boom"));
        assert!(message.contains("rollback also failed"));
    }

    #[test]
    fn savepoint_name_is_validated() {
        let mut conn = RecordingConnection::new();
        assert!(conn.savepoint("sp_1").is_ok());
        assert!(conn.savepoint("sp 1; DROP TABLE users").is_err());
        assert_eq!(conn.log, vec!["SAVEPOINT sp_1"]);
    }
}
