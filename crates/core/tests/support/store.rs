//! In-memory `CardStore`
//!
//! Keeps raw JSON documents in id order and derives the two queue views on
//! every query. Supports failure injection, scripted revision conflicts and
//! an artificial query delay for cancellation tests.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use async_trait::async_trait;
use flashback_core::{CardStore, KeyRange, ViewPage, ViewQuery, ViewRow};
use flashback_domain::{Card, FlashbackError, Queue, Result};
use parking_lot::Mutex;
use serde_json::Value;

/// A conflict the store reports on the next write to a card.
#[derive(Debug, Clone)]
enum ScriptedConflict {
    /// Another writer bumped the revision without touching the burial.
    Revision,
    /// Another writer buried the card until the given timestamp.
    Burial(String),
}

#[derive(Default)]
pub struct MemoryCardStore {
    docs: Mutex<BTreeMap<String, Value>>,
    queries: Mutex<Vec<(String, ViewQuery)>>,
    puts: Mutex<Vec<String>>,
    conflicts: Mutex<HashMap<String, Vec<ScriptedConflict>>>,
    query_failure: Mutex<Option<FlashbackError>>,
    query_delay: Mutex<Option<Duration>>,
}

impl MemoryCardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let store = Self::new();
        for card in cards {
            store.insert(card);
        }
        store
    }

    pub fn insert(&self, card: Card) {
        let doc = card.to_document().expect("card encodes");
        self.insert_raw(card.id.as_str(), doc);
    }

    /// Store a document as-is, bypassing the card codec.
    pub fn insert_raw(&self, id: &str, mut doc: Value) {
        doc["_rev"] = Value::String("1-mem".to_string());
        self.docs.lock().insert(id.to_string(), doc);
    }

    pub fn card(&self, id: &str) -> Card {
        let doc = self.docs.lock().get(id).cloned().expect("document exists");
        Card::from_document(doc).expect("document decodes")
    }

    pub fn fail_queries_with(&self, err: FlashbackError) {
        *self.query_failure.lock() = Some(err);
    }

    pub fn delay_queries(&self, delay: Duration) {
        *self.query_delay.lock() = Some(delay);
    }

    /// Fail the next `times` writes to `id` as if another writer got there
    /// first.
    pub fn script_conflicts(&self, id: &str, times: usize) {
        let mut conflicts = self.conflicts.lock();
        let entry = conflicts.entry(id.to_string()).or_default();
        entry.extend(std::iter::repeat(ScriptedConflict::Revision).take(times));
    }

    /// Fail the next write to `id` after burying it until `until`.
    pub fn script_competing_burial(&self, id: &str, until: &str) {
        self.conflicts
            .lock()
            .entry(id.to_string())
            .or_default()
            .push(ScriptedConflict::Burial(until.to_string()));
    }

    pub fn queries(&self) -> Vec<(String, ViewQuery)> {
        self.queries.lock().clone()
    }

    /// Ids of successful writes, in order.
    pub fn puts(&self) -> Vec<String> {
        self.puts.lock().clone()
    }

    fn view_rows(&self, view: &str) -> Result<Vec<ViewRow>> {
        let (reviewed, sort_field) = if view == Queue::New.view_name() {
            (false, "created")
        } else if view == Queue::Old.view_name() {
            (true, "due")
        } else {
            return Err(FlashbackError::QueryFailure(format!("unknown view '{view}'")));
        };

        let docs = self.docs.lock();
        let mut keyed: Vec<(String, ViewRow)> = docs
            .iter()
            .filter(|(id, _)| id.starts_with("card-"))
            .filter(|(_, doc)| (doc["reviewCount"].as_u64().unwrap_or(0) > 0) == reviewed)
            .map(|(id, doc)| {
                let key = doc[sort_field].as_str().unwrap_or_default().to_string();
                (key, ViewRow { id: id.clone(), doc: Some(doc.clone()) })
            })
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.id.cmp(&b.1.id)));
        Ok(keyed.into_iter().map(|(_, row)| row).collect())
    }
}

fn bump(rev: Option<&str>) -> String {
    let generation = rev
        .and_then(|rev| rev.split_once('-'))
        .and_then(|(generation, _)| generation.parse::<u64>().ok())
        .unwrap_or(0);
    format!("{}-mem", generation + 1)
}

#[async_trait]
impl CardStore for MemoryCardStore {
    async fn query(&self, view: &str, query: ViewQuery) -> Result<ViewPage> {
        let delay = *self.query_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.queries.lock().push((view.to_string(), query));
        if let Some(err) = self.query_failure.lock().clone() {
            return Err(err);
        }

        let rows = self.view_rows(view)?;
        let total_rows = rows.len();
        let rows = rows.into_iter().skip(query.offset).take(query.limit).collect();
        Ok(ViewPage { rows, total_rows })
    }

    async fn all_docs(&self, range: KeyRange) -> Result<Vec<ViewRow>> {
        if let Some(err) = self.query_failure.lock().clone() {
            return Err(err);
        }
        let docs = self.docs.lock();
        Ok(docs
            .range(range.start_key..=range.end_key)
            .map(|(id, doc)| ViewRow {
                id: id.clone(),
                doc: range.include_docs.then(|| doc.clone()),
            })
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Value> {
        self.docs
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| FlashbackError::NotFound(id.to_string()))
    }

    async fn put(&self, id: &str, mut doc: Value, previous_rev: Option<&str>) -> Result<String> {
        let mut docs = self.docs.lock();
        let current_rev = docs.get(id).and_then(|doc| doc["_rev"].as_str().map(str::to_string));

        let scripted = self.conflicts.lock().get_mut(id).and_then(|queue| {
            if queue.is_empty() {
                None
            } else {
                Some(queue.remove(0))
            }
        });
        if let Some(conflict) = scripted {
            if let Some(stored) = docs.get_mut(id) {
                stored["_rev"] = Value::String(bump(current_rev.as_deref()));
                if let ScriptedConflict::Burial(until) = conflict {
                    stored["buriedUntil"] = Value::String(until);
                }
            }
            return Err(FlashbackError::RevisionConflict(id.to_string()));
        }

        if current_rev.as_deref() != previous_rev {
            return Err(FlashbackError::RevisionConflict(id.to_string()));
        }
        let rev = bump(current_rev.as_deref());
        doc["_rev"] = Value::String(rev.clone());
        docs.insert(id.to_string(), doc);
        self.puts.lock().push(id.to_string());
        Ok(rev)
    }
}
