//! SQLite connection pool
//!
//! r2d2 pool over `r2d2_sqlite` with per-connection pragmas applied on
//! checkout of each new connection.

use std::path::Path;
use std::time::Duration;

use flashback_domain::Result;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use tracing::warn;

use crate::errors::map_pool_error;

pub type SqlitePool = Pool<SqliteConnectionManager>;
pub type SqliteConnection = PooledConnection<SqliteConnectionManager>;

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Build a pool of at most `max_size` connections to the database at `path`.
pub fn create_pool<P: AsRef<Path>>(path: P, max_size: u32) -> Result<SqlitePool> {
    let manager = SqliteConnectionManager::file(path.as_ref()).with_init(apply_connection_pragmas);

    Pool::builder()
        .max_size(max_size.max(1))
        .connection_timeout(CONNECTION_TIMEOUT)
        .build(manager)
        .map_err(|e| {
            warn!(error = %e, "failed to create connection pool");
            map_pool_error(e)
        })
}

/// WAL journaling so view reads do not block burial writes.
fn apply_connection_pragmas(conn: &mut Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA journal_mode=WAL;\nPRAGMA synchronous=NORMAL;\n")?;
    conn.busy_timeout(BUSY_TIMEOUT)
}
