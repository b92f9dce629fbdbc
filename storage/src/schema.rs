use rusqlite::Connection;

/// Create the todo table if it does not exist yet. Safe to run against a
/// database that already has it.
pub(crate) fn bootstrap(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            is_done INTEGER NOT NULL DEFAULT 0
        );",
    )
}

/// Switch a file database to write-ahead logging so readers do not block the
/// writer. The mode sticks to the file.
pub(crate) fn enable_wal(conn: &Connection) -> rusqlite::Result<()> {
    let mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    if !mode.eq_ignore_ascii_case("wal") {
        tracing::warn!(%mode, "sqlite refused WAL journal mode");
    }
    Ok(())
}
