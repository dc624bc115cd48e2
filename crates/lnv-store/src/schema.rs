use rusqlite::{Connection, OptionalExtension, params};

use crate::error::Result;

pub const SCHEMA_VERSION: i64 = 1;

const VERSION_KEY: &str = "schema_version";

/// Table name and DDL, created in order.
const TABLES: &[(&str, &str)] = &[
    (
        "metadata",
        "CREATE TABLE IF NOT EXISTS metadata (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
    ),
    (
        "favorites",
        "CREATE TABLE IF NOT EXISTS favorites (
            name     TEXT PRIMARY KEY,
            added_at TEXT NOT NULL DEFAULT ''
        )",
    ),
    (
        "visits",
        "CREATE TABLE IF NOT EXISTS visits (
            name       TEXT PRIMARY KEY,
            rating     INTEGER NOT NULL DEFAULT 0 CHECK (rating IN (-1, 0, 1)),
            visited_at TEXT NOT NULL DEFAULT ''
        )",
    ),
];

/// Prepare a connection: WAL, a busy timeout for concurrent CLI runs, and
/// every table. Safe to call on an existing database.
pub fn initialize(conn: &Connection) -> Result<()> {
    let journal: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    conn.pragma_update(None, "busy_timeout", 5000)?;

    for (_, ddl) in TABLES {
        conn.execute(ddl, [])?;
    }
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        params![VERSION_KEY, SCHEMA_VERSION.to_string()],
    )?;

    tracing::debug!(version = SCHEMA_VERSION, journal = %journal, "schema ready");
    Ok(())
}

/// Recorded schema version; `None` before `initialize` has run.
pub fn schema_version(conn: &Connection) -> Result<Option<i64>> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            [VERSION_KEY],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value.and_then(|v| v.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_all_tables_exist() {
        let conn = fresh();
        assert_eq!(table_names(&conn), vec!["favorites", "metadata", "visits"]);
    }

    #[test]
    fn test_version_recorded() {
        let conn = fresh();
        assert_eq!(schema_version(&conn).unwrap(), Some(SCHEMA_VERSION));
    }

    #[test]
    fn test_version_missing_before_init() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(TABLES[0].1, []).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), None);
    }

    #[test]
    fn test_reinitialize_keeps_rows() {
        let conn = fresh();
        conn.execute(
            "INSERT INTO favorites (name, added_at) VALUES ('Lantern', '2026-02-21T04:00:00Z')",
            [],
        )
        .unwrap();
        initialize(&conn).unwrap();
        let kept: i64 = conn
            .query_row("SELECT count(*) FROM favorites", [], |row| row.get(0))
            .unwrap();
        assert_eq!(kept, 1);
    }

    #[test]
    fn test_rating_must_be_a_thumb() {
        let conn = fresh();
        for (rating, ok) in [(-1, true), (0, true), (1, true), (2, false), (-5, false)] {
            let res = conn.execute(
                "INSERT OR REPLACE INTO visits (name, rating) VALUES ('x', ?1)",
                [rating],
            );
            assert_eq!(res.is_ok(), ok, "rating {rating}");
        }
    }

    #[test]
    fn test_busy_timeout() {
        let conn = fresh();
        let ms: i64 = conn
            .pragma_query_value(None, "busy_timeout", |row| row.get(0))
            .unwrap();
        assert_eq!(ms, 5000);
    }
}
