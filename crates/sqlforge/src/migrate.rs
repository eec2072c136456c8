//! Schema migrations.
//!
//! A migrations directory holds one subfolder per version, ordered lexically
//! and numbered consecutively from 1. Each subfolder contains `up.sql`
//! (required) and optionally `down.sql`. Applied transitions are recorded in
//! the `schema_migrations` table; the current version is the `to_version` of
//! the newest row, or 0 when the table is empty.
//!
//! Each version step runs in its own transaction: execute the step's SQL,
//! record the transition, then re-read the version and verify it matches the
//! step's target before committing. A mismatch rolls the step back and aborts
//! the run.

use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::compile::Compile;
use crate::connection::{Connection, with_transaction};
use crate::error::{SqlError, SqlResult};
use crate::field::field;
use crate::stmt::{Direction, insert, select};

/// History table recording one row per applied transition.
pub const MIGRATION_TABLE: &str = "schema_migrations";

const CREATE_MIGRATION_TABLE: &str = "CREATE TABLE IF NOT EXISTS schema_migrations (\
     timestamp TEXT NOT NULL, from_version INTEGER NOT NULL, to_version INTEGER NOT NULL)";

/// One version step loaded from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub version: u64,
    pub name: String,
    pub up: String,
    pub down: Option<String>,
}

/// Orders migrations and steps a connection between schema versions.
#[derive(Debug, Clone)]
pub struct Migrator {
    migrations: Vec<Migration>,
}

impl Migrator {
    /// Build a migrator from an already-ordered migration list.
    pub fn new(migrations: Vec<Migration>) -> Self {
        Self { migrations }
    }

    /// Load migrations from a directory of version subfolders.
    ///
    /// Subfolders are ordered by name and assigned versions 1..n. A subfolder
    /// without `up.sql` is an error; `down.sql` is optional.
    pub fn from_dir(dir: impl AsRef<Path>) -> SqlResult<Self> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|e| {
            SqlError::migration(format!("failed to read migrations dir {}: {e}", dir.display()))
        })?;

        let mut folders = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SqlError::migration(format!("failed to read entry in {}: {e}", dir.display()))
            })?;
            let path = entry.path();
            if path.is_dir() {
                folders.push(path);
            }
        }
        folders.sort();

        let mut migrations = Vec::with_capacity(folders.len());
        for (index, folder) in folders.iter().enumerate() {
            let version = index as u64 + 1;
            let name = folder
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let up_path = folder.join("up.sql");
            let up = fs::read_to_string(&up_path).map_err(|e| {
                SqlError::migration(format!(
                    "migration '{name}' (version {version}) is missing up.sql: {e}"
                ))
            })?;

            let down_path = folder.join("down.sql");
            let down = if down_path.is_file() {
                Some(fs::read_to_string(&down_path).map_err(|e| {
                    SqlError::migration(format!(
                        "failed to read {}: {e}",
                        down_path.display()
                    ))
                })?)
            } else {
                None
            };

            tracing::debug!(version, name = %name, has_down = down.is_some(), "loaded migration");
            migrations.push(Migration {
                version,
                name,
                up,
                down,
            });
        }

        Ok(Self::new(migrations))
    }

    /// The ordered migration list.
    pub fn migrations(&self) -> &[Migration] {
        &self.migrations
    }

    /// The highest defined version, or 0 with no migrations.
    pub fn latest_version(&self) -> u64 {
        self.migrations.len() as u64
    }

    /// The version currently recorded in the history table.
    pub fn current_version<C>(&self, conn: &mut C) -> SqlResult<u64>
    where
        C: Connection + ?Sized,
    {
        self.ensure_history_table(conn)?;
        self.read_version(conn)
    }

    /// The migrations not yet applied, in application order.
    pub fn pending<C>(&self, conn: &mut C) -> SqlResult<Vec<&Migration>>
    where
        C: Connection + ?Sized,
    {
        let current = self.current_version(conn)?;
        Ok(self
            .migrations
            .iter()
            .filter(|m| m.version > current)
            .collect())
    }

    /// Migrate up to the latest defined version.
    pub fn up<C>(&self, conn: &mut C) -> SqlResult<u64>
    where
        C: Connection + ?Sized,
    {
        self.migrate_to(conn, self.latest_version())
    }

    /// Step the schema to `target`, one version-per-transaction.
    ///
    /// Returns the version reached. Steps run strictly in sequence; a failed
    /// step leaves the schema at the last committed version.
    pub fn migrate_to<C>(&self, conn: &mut C, target: u64) -> SqlResult<u64>
    where
        C: Connection + ?Sized,
    {
        if target > self.latest_version() {
            return Err(SqlError::migration(format!(
                "target version {target} out of range (highest defined is {})",
                self.latest_version()
            )));
        }

        let current = self.current_version(conn)?;
        if current > self.latest_version() {
            return Err(SqlError::migration(format!(
                "database reports version {current} but only {} migrations are defined",
                self.latest_version()
            )));
        }

        if current < target {
            for version in current + 1..=target {
                let migration = self.get(version)?;
                tracing::info!(from = version - 1, to = version, name = %migration.name, "migrating up");
                self.step(conn, &migration.up, version - 1, version)?;
            }
        } else {
            for version in ((target + 1)..=current).rev() {
                let migration = self.get(version)?;
                let Some(down) = &migration.down else {
                    return Err(SqlError::migration(format!(
                        "cannot migrate below version {version}: '{}' has no down.sql",
                        migration.name
                    )));
                };
                tracing::info!(from = version, to = version - 1, name = %migration.name, "migrating down");
                self.step(conn, down, version, version - 1)?;
            }
        }

        Ok(target)
    }

    fn get(&self, version: u64) -> SqlResult<&Migration> {
        self.migrations
            .iter()
            .find(|m| m.version == version)
            .ok_or_else(|| SqlError::migration(format!("no migration defined for version {version}")))
    }

    /// One transition: run the SQL, record it, and verify the version landed
    /// where the step says it should, all inside one transaction.
    fn step<C>(&self, conn: &mut C, sql: &str, from: u64, to: u64) -> SqlResult<()>
    where
        C: Connection + ?Sized,
    {
        with_transaction(conn, |tx| {
            tx.execute(sql, &[])?;
            record_transition(tx, from, to)?;

            let now = self.read_version(tx)?;
            if now != to {
                return Err(SqlError::migration(format!(
                    "version check failed after step {from} -> {to}: database reports {now}"
                )));
            }
            Ok(())
        })
    }

    fn ensure_history_table<C>(&self, conn: &mut C) -> SqlResult<()>
    where
        C: Connection + ?Sized,
    {
        conn.execute(CREATE_MIGRATION_TABLE, &[]).map(|_| ())
    }

    fn read_version<C>(&self, conn: &mut C) -> SqlResult<u64>
    where
        C: Connection + ?Sized,
    {
        let query = select(MIGRATION_TABLE)
            .field(field("to_version"))
            .order_by(field("timestamp"), Direction::Desc)
            .limit(1);
        let stmt = query.compile_with(conn.dialect());
        let rows = conn.run(&stmt)?;

        match rows.first().and_then(|row| row.first()) {
            Some(Some(value)) => {
                let version = value.to_i64()?;
                u64::try_from(version).map_err(|_| {
                    SqlError::migration(format!("negative version in history: {version}"))
                })
            }
            _ => Ok(0),
        }
    }
}

fn record_transition<C>(conn: &mut C, from: u64, to: u64) -> SqlResult<()>
where
    C: Connection + ?Sized,
{
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| SqlError::migration(format!("system clock before epoch: {e}")))?
        .as_nanos()
        .to_string();

    let stmt = insert(MIGRATION_TABLE)
        .set("timestamp", timestamp)
        .set("from_version", from)
        .set("to_version", to)
        .compile_with(conn.dialect());
    conn.run(&stmt).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::Row;
    use crate::value::Value;

    fn make_temp_dir() -> std::path::PathBuf {
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("sqlforge-migrate-test-{nonce}"));
        std::fs::create_dir_all(&dir).expect("mkdir");
        dir
    }

    fn write_migration(dir: &Path, name: &str, up: &str, down: Option<&str>) {
        let folder = dir.join(name);
        std::fs::create_dir_all(&folder).expect("mkdir");
        std::fs::write(folder.join("up.sql"), up).expect("write up");
        if let Some(down) = down {
            std::fs::write(folder.join("down.sql"), down).expect("write down");
        }
    }

    #[derive(Debug, Default, Clone)]
    struct State {
        history: Vec<(String, u64, u64)>,
        applied: Vec<String>,
    }

    /// In-memory fake: interprets only the statements the migrator issues and
    /// snapshots state on BEGIN so ROLLBACK can restore it.
    #[derive(Debug, Default)]
    struct MemoryConnection {
        state: State,
        snapshot: Option<State>,
        drop_history_inserts: bool,
    }

    impl MemoryConnection {
        fn at_version(version: u64) -> Self {
            let mut conn = Self::default();
            for v in 1..=version {
                conn.state.history.push((v.to_string(), v - 1, v));
            }
            conn
        }
    }

    impl Connection for MemoryConnection {
        fn execute(&mut self, text: &str, parameters: &[Option<Value>]) -> SqlResult<Vec<Row>> {
            match text {
                "BEGIN" => self.snapshot = Some(self.state.clone()),
                "COMMIT" => self.snapshot = None,
                "ROLLBACK" => {
                    if let Some(snapshot) = self.snapshot.take() {
                        self.state = snapshot;
                    }
                }
                t if t.starts_with("CREATE TABLE IF NOT EXISTS schema_migrations") => {}
                t if t.starts_with("INSERT INTO schema_migrations") => {
                    if !self.drop_history_inserts {
                        let ts = parameters[0].as_ref().expect("ts").to_string();
                        let from = parameters[1].as_ref().expect("from").to_i64().expect("int");
                        let to = parameters[2].as_ref().expect("to").to_i64().expect("int");
                        self.state.history.push((ts, from as u64, to as u64));
                    }
                }
                t if t.starts_with("SELECT to_version FROM schema_migrations") => {
                    return Ok(self
                        .state
                        .history
                        .last()
                        .map(|(_, _, to)| vec![Some(Value::text(to.to_string()))])
                        .into_iter()
                        .collect());
                }
                other => self.state.applied.push(other.to_string()),
            }
            Ok(Vec::new())
        }
    }

    fn three_step_migrator() -> Migrator {
        Migrator::new(vec![
            Migration {
                version: 1,
                name: "001_init".into(),
                up: "CREATE TABLE t1(id int)".into(),
                down: Some("DROP TABLE t1".into()),
            },
            Migration {
                version: 2,
                name: "002_users".into(),
                up: "CREATE TABLE users(id int)".into(),
                down: Some("DROP TABLE users".into()),
            },
            Migration {
                version: 3,
                name: "003_posts".into(),
                up: "CREATE TABLE posts(id int)".into(),
                down: Some("DROP TABLE posts".into()),
            },
        ])
    }

    #[test]
    fn from_dir_assigns_lexical_versions() {
        let dir = make_temp_dir();
        write_migration(&dir, "002_users", "CREATE TABLE users(id int);", None);
        write_migration(&dir, "001_init", "CREATE TABLE t1(id int);", Some("DROP TABLE t1;"));

        let migrator = Migrator::from_dir(&dir).expect("scan");
        let migrations = migrator.migrations();
        assert_eq!(migrations.len(), 2);
        assert_eq!(migrations[0].version, 1);
        assert_eq!(migrations[0].name, "001_init");
        assert!(migrations[0].down.is_some());
        assert_eq!(migrations[1].version, 2);
        assert_eq!(migrations[1].name, "002_users");
        assert!(migrations[1].down.is_none());

        std::fs::remove_dir_all(dir).expect("cleanup");
    }

    #[test]
    fn from_dir_requires_up_sql() {
        let dir = make_temp_dir();
        let folder = dir.join("001_broken");
        std::fs::create_dir_all(&folder).expect("mkdir");
        std::fs::write(folder.join("down.sql"), "DROP TABLE x;").expect("write");

        let err = Migrator::from_dir(&dir).expect_err("must fail");
        assert!(err.is_migration());
        assert!(err.to_string().contains("up.sql"));

        std::fs::remove_dir_all(dir).expect("cleanup");
    }

    #[test]
    fn migrating_one_to_three_runs_two_steps() {
        let migrator = three_step_migrator();
        let mut conn = MemoryConnection::at_version(1);

        let reached = migrator.migrate_to(&mut conn, 3).expect("migrate");
        assert_eq!(reached, 3);
        assert_eq!(
            conn.state.applied,
            vec!["CREATE TABLE users(id int)", "CREATE TABLE posts(id int)"]
        );

        // One new history row per step, each matching the transition.
        let new_rows: Vec<(u64, u64)> = conn.state.history[1..]
            .iter()
            .map(|(_, from, to)| (*from, *to))
            .collect();
        assert_eq!(new_rows, vec![(1, 2), (2, 3)]);
        assert_eq!(migrator.current_version(&mut conn).expect("version"), 3);
    }

    #[test]
    fn up_from_empty_applies_everything() {
        let migrator = three_step_migrator();
        let mut conn = MemoryConnection::default();

        assert_eq!(migrator.current_version(&mut conn).expect("version"), 0);
        assert_eq!(migrator.pending(&mut conn).expect("pending").len(), 3);

        migrator.up(&mut conn).expect("migrate");
        assert_eq!(conn.state.applied.len(), 3);
        assert_eq!(migrator.current_version(&mut conn).expect("version"), 3);
        assert!(migrator.pending(&mut conn).expect("pending").is_empty());
    }

    #[test]
    fn migrating_down_runs_down_steps_newest_first() {
        let migrator = three_step_migrator();
        let mut conn = MemoryConnection::at_version(3);

        migrator.migrate_to(&mut conn, 1).expect("migrate");
        assert_eq!(conn.state.applied, vec!["DROP TABLE posts", "DROP TABLE users"]);
        assert_eq!(migrator.current_version(&mut conn).expect("version"), 1);
    }

    #[test]
    fn missing_down_sql_aborts_before_executing() {
        let mut migrations = three_step_migrator().migrations().to_vec();
        migrations[1].down = None;
        let migrator = Migrator::new(migrations);
        let mut conn = MemoryConnection::at_version(3);

        let err = migrator.migrate_to(&mut conn, 0).expect_err("must fail");
        assert!(err.is_migration());
        assert!(err.to_string().contains("down.sql"));
        // Version 3 stepped down before the missing file was hit.
        assert_eq!(conn.state.applied, vec!["DROP TABLE posts"]);
        assert_eq!(migrator.current_version(&mut conn).expect("version"), 2);
    }

    #[test]
    fn target_out_of_range() {
        let migrator = three_step_migrator();
        let mut conn = MemoryConnection::default();

        let err = migrator.migrate_to(&mut conn, 9).expect_err("must fail");
        assert!(err.is_migration());
        assert!(conn.state.applied.is_empty());
    }

    #[test]
    fn version_mismatch_rolls_back_the_step() {
        let migrator = three_step_migrator();
        let mut conn = MemoryConnection::default();
        conn.drop_history_inserts = true;

        let err = migrator.migrate_to(&mut conn, 1).expect_err("must fail");
        assert!(err.is_migration());
        assert!(err.to_string().contains("version check failed"));
        // The step's schema change was rolled back with the transaction.
        assert!(conn.state.applied.is_empty());
    }
}
