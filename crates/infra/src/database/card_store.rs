//! SQLite-backed card document store
//!
//! Documents are kept as JSON text keyed by id with a separate revision
//! column. The two study queues are SQL views over the document table.

use std::sync::Arc;

use async_trait::async_trait;
use flashback_core::{CardStore, KeyRange, ViewPage, ViewQuery, ViewRow};
use flashback_domain::{FlashbackError, Queue, Result};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use serde_json::Value;
use tokio::task;
use tracing::{debug, instrument};

use super::manager::DbManager;
use super::revision::next_revision;
use crate::errors::{map_join_error, map_sql_error};

/// SQLite implementation of the [`CardStore`] port
pub struct SqliteCardStore {
    db: Arc<DbManager>,
}

impl SqliteCardStore {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CardStore for SqliteCardStore {
    #[instrument(skip(self), fields(limit = query.limit, offset = query.offset))]
    async fn query(&self, view: &str, query: ViewQuery) -> Result<ViewPage> {
        let queue: Queue = view.parse().map_err(FlashbackError::QueryFailure)?;
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<ViewPage> {
            let conn = db.get_connection()?;
            query_view(&conn, queue, query)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn all_docs(&self, range: KeyRange) -> Result<Vec<ViewRow>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> Result<Vec<ViewRow>> {
            let conn = db.get_connection()?;
            query_id_range(&conn, &range)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get(&self, id: &str) -> Result<Value> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> Result<Value> {
            let conn = db.get_connection()?;
            let stored = conn
                .query_row("SELECT rev, body FROM documents WHERE id = ?1", params![id], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                })
                .optional()
                .map_err(map_sql_error)?;
            let (rev, body) = stored.ok_or_else(|| FlashbackError::NotFound(id.clone()))?;
            document_with_rev(&body, rev)
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self, doc))]
    async fn put(&self, id: &str, doc: Value, previous_rev: Option<&str>) -> Result<String> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();
        let previous_rev = previous_rev.map(str::to_string);

        task::spawn_blocking(move || -> Result<String> {
            let mut conn = db.get_connection()?;
            write_document(&mut conn, &id, doc, previous_rev.as_deref())
        })
        .await
        .map_err(map_join_error)?
    }
}

// ============================================================================
// SQL Operations (synchronous)
// ============================================================================

fn query_view(conn: &Connection, queue: Queue, query: ViewQuery) -> Result<ViewPage> {
    let view = queue.view_name();
    let total_rows: i64 = conn
        .query_row(&format!("SELECT COUNT(*) FROM \"{view}\""), [], |row| row.get(0))
        .map_err(map_sql_error)?;

    let sql = format!("SELECT id, rev, body FROM \"{view}\" ORDER BY sort_key, id LIMIT ?1 OFFSET ?2");
    let mut stmt = conn.prepare(&sql).map_err(map_sql_error)?;
    let raw = stmt
        .query_map(params![to_sql_int(query.limit), to_sql_int(query.offset)], map_document_row)
        .map_err(map_sql_error)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(map_sql_error)?;

    let rows = raw
        .into_iter()
        .map(|(id, rev, body)| to_view_row(id, rev, &body, query.include_docs))
        .collect::<Result<Vec<_>>>()?;
    debug!(view, returned = rows.len(), total_rows, "view page read");

    Ok(ViewPage { rows, total_rows: usize::try_from(total_rows).unwrap_or_default() })
}

fn query_id_range(conn: &Connection, range: &KeyRange) -> Result<Vec<ViewRow>> {
    let mut stmt = conn
        .prepare("SELECT id, rev, body FROM documents WHERE id >= ?1 AND id <= ?2 ORDER BY id")
        .map_err(map_sql_error)?;
    let raw = stmt
        .query_map(params![range.start_key, range.end_key], map_document_row)
        .map_err(map_sql_error)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(map_sql_error)?;

    raw.into_iter()
        .map(|(id, rev, body)| to_view_row(id, rev, &body, range.include_docs))
        .collect()
}

fn write_document(
    conn: &mut Connection,
    id: &str,
    doc: Value,
    previous_rev: Option<&str>,
) -> Result<String> {
    let body = stored_body(id, doc)?;

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate).map_err(map_sql_error)?;
    let current_rev: Option<String> = tx
        .query_row("SELECT rev FROM documents WHERE id = ?1", params![id], |row| row.get(0))
        .optional()
        .map_err(map_sql_error)?;

    if current_rev.as_deref() != previous_rev {
        debug!(id, current = ?current_rev, previous = ?previous_rev, "stale revision");
        return Err(FlashbackError::RevisionConflict(id.to_string()));
    }

    let rev = next_revision(current_rev.as_deref(), &body)?;
    tx.execute(
        "INSERT INTO documents (id, rev, body) VALUES (?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET rev = excluded.rev, body = excluded.body",
        params![id, rev, body],
    )
    .map_err(map_sql_error)?;
    tx.commit().map_err(map_sql_error)?;
    Ok(rev)
}

/// Body as persisted: `_id` forced to the key, `_rev` kept in its own column.
fn stored_body(id: &str, doc: Value) -> Result<String> {
    let Value::Object(mut fields) = doc else {
        return Err(FlashbackError::InvalidInput(format!("document '{id}' is not an object")));
    };
    if let Some(embedded) = fields.get("_id").and_then(Value::as_str) {
        if embedded != id {
            return Err(FlashbackError::InvalidInput(format!(
                "document id '{embedded}' does not match key '{id}'"
            )));
        }
    }
    fields.remove("_rev");
    fields.insert("_id".to_string(), Value::String(id.to_string()));
    Ok(serde_json::to_string(&Value::Object(fields))?)
}

fn document_with_rev(body: &str, rev: String) -> Result<Value> {
    let mut doc: Value = serde_json::from_str(body)
        .map_err(|e| FlashbackError::DecodeFailure(format!("scan doc: {e}")))?;
    if let Value::Object(fields) = &mut doc {
        fields.insert("_rev".to_string(), Value::String(rev));
    }
    Ok(doc)
}

fn to_view_row(id: String, rev: String, body: &str, include_docs: bool) -> Result<ViewRow> {
    let doc = if include_docs { Some(document_with_rev(body, rev)?) } else { None };
    Ok(ViewRow { id, doc })
}

fn map_document_row(row: &Row<'_>) -> rusqlite::Result<(String, String, String)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn to_sql_int(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
