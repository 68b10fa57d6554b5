#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, TimeZone};
use flashback_core::{CardStore, Clock};
use flashback_domain::Card;
use flashback_infra::database::{DbManager, SqliteCardStore};
use tempfile::TempDir;

/// Temporary database wrapper that keeps the underlying file alive for the
/// duration of a test run.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    pub store: Arc<SqliteCardStore>,
    _temp_dir: TempDir,
}

impl TestDatabase {
    /// Create a migrated database in a fresh temporary directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let db_path = temp_dir.path().join("cards.db");

        let manager = Arc::new(DbManager::new(&db_path, 4).expect("db manager should be created"));
        manager.run_migrations().expect("migrations should run");
        let store = Arc::new(SqliteCardStore::new(Arc::clone(&manager)));

        Self { manager, store, _temp_dir: temp_dir }
    }

    /// Insert cards as brand-new documents.
    pub async fn seed(&self, cards: impl IntoIterator<Item = Card>) {
        for card in cards {
            let doc = card.to_document().expect("card encodes");
            self.store.put(card.id.as_str(), doc, None).await.expect("seed write succeeds");
        }
    }

    /// Read a card back through the store.
    pub async fn card(&self, id: &str) -> Card {
        let doc = self.store.get(id).await.expect("document exists");
        Card::from_document(doc).expect("document decodes")
    }

    /// Execute a batch of SQL statements against the database.
    pub fn execute_batch(&self, sql: &str) {
        let conn = self
            .manager
            .get_connection()
            .expect("connection should be available for execute_batch");
        conn.execute_batch(sql).expect("SQL batch execution should succeed");
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// Clock frozen at one instant.
pub struct FrozenClock(pub DateTime<FixedOffset>);

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// 2017-06-01T12:00:00 at the given hour offset.
pub fn noon(offset_hours: i32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(offset_hours * 3600)
        .expect("valid offset")
        .with_ymd_and_hms(2017, 6, 1, 12, 0, 0)
        .single()
        .expect("valid instant")
}
