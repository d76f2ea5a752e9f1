use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::{SnapshotStore, SnapshotStoreFactory};
use crate::domain::{
    id_hex, DeleteOutcome, DomainError, Filter, InsertOutcome, UpdateOutcome, ID_FIELD,
};

/// Snapshot collection held in process memory, in insertion order.
///
/// Filters are evaluated with document-store semantics: dotted paths descend
/// into objects and fan out across arrays. Caller-supplied filters support
/// equality only.
pub struct InMemorySnapshotStore {
    documents: Arc<Mutex<Vec<Map<String, Value>>>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Seed the collection. Non-object values are skipped; documents without
    /// an `_id` are given one.
    pub fn with_documents(documents: Vec<Value>) -> Self {
        let documents = documents
            .into_iter()
            .filter_map(|value| match value {
                Value::Object(mut map) => {
                    map.entry(ID_FIELD)
                        .or_insert_with(|| Value::String(ObjectId::new().to_hex()));
                    Some(map)
                }
                _ => None,
            })
            .collect();

        Self {
            documents: Arc::new(Mutex::new(documents)),
        }
    }
}

impl Default for InMemorySnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_path<'a>(value: &'a Value, segments: &[&str], out: &mut Vec<&'a Value>) {
    match segments.split_first() {
        None => {
            out.push(value);
            if let Value::Array(items) = value {
                out.extend(items.iter());
            }
        }
        Some((head, rest)) => match value {
            Value::Object(map) => {
                if let Some(child) = map.get(*head) {
                    collect_path(child, rest, out);
                }
            }
            Value::Array(items) => {
                for item in items {
                    collect_path(item, segments, out);
                }
            }
            _ => {}
        },
    }
}

/// All values reachable at a dotted path.
fn path_values<'a>(document: &'a Map<String, Value>, path: &str) -> Vec<&'a Value> {
    let segments: Vec<&str> = path.split('.').collect();
    let mut out = Vec::new();
    if let Some((head, rest)) = segments.split_first() {
        if let Some(child) = document.get(*head) {
            collect_path(child, rest, &mut out);
        }
    }
    out
}

fn matches_filter(filter: &Filter, document: &Map<String, Value>) -> bool {
    match filter {
        Filter::All => true,
        Filter::Eq { field, value } => path_values(document, field)
            .into_iter()
            .any(|candidate| candidate.as_str() == Some(value.as_str())),
        Filter::Or(children) => children.iter().any(|child| matches_filter(child, document)),
        Filter::And(children) => children.iter().all(|child| matches_filter(child, document)),
    }
}

fn check_equality_filter(filter: &Map<String, Value>) -> Result<(), DomainError> {
    match filter.keys().find(|key| key.starts_with('$')) {
        Some(key) => Err(DomainError::invalid_input(format!(
            "operator '{}' is not supported by the in-memory store",
            key
        ))),
        None => Ok(()),
    }
}

fn matches_equality(filter: &Map<String, Value>, document: &Map<String, Value>) -> bool {
    filter.iter().all(|(key, expected)| {
        if key == ID_FIELD {
            return match (document.get(ID_FIELD), id_hex(expected)) {
                (Some(stored), Some(hex)) => id_hex(stored) == Some(hex),
                (Some(stored), None) => stored == expected,
                (None, _) => false,
            };
        }
        path_values(document, key)
            .into_iter()
            .any(|candidate| candidate == expected)
    })
}

/// Write `value` at a dotted path, creating intermediate objects. Returns
/// whether the stored value changed.
fn set_path(document: &mut Map<String, Value>, path: &str, value: Value) -> Result<bool, DomainError> {
    let mut segments = path.split('.').peekable();
    let mut current = document;

    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            let changed = current.get(segment) != Some(&value);
            current.insert(segment.to_string(), value);
            return Ok(changed);
        }

        let child = current
            .entry(segment)
            .or_insert_with(|| Value::Object(Map::new()));
        current = match child {
            Value::Object(map) => map,
            _ => {
                return Err(DomainError::storage(format!(
                    "cannot create field below non-object '{}' in '{}'",
                    segment, path
                )))
            }
        };
    }

    Ok(false)
}

/// Seed document for an upsert: the filter's plain equality fields. Keys that
/// collide once expanded, such as `a` and `a.b`, are rejected.
fn upsert_seed(filter: &Map<String, Value>) -> Result<Map<String, Value>, DomainError> {
    let mut seed = Map::new();
    for (key, value) in filter {
        let value = if key == ID_FIELD {
            match id_hex(value) {
                Some(hex) => Value::String(hex.to_string()),
                None => value.clone(),
            }
        } else {
            value.clone()
        };
        set_path(&mut seed, key, value).map_err(|_| {
            DomainError::invalid_input(format!("conflicting filter field '{}' for upsert", key))
        })?;
    }
    Ok(seed)
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn find_one(&self, filter: &Filter) -> Result<Option<Value>, DomainError> {
        let documents = self.documents.lock().await;
        Ok(documents
            .iter()
            .find(|document| matches_filter(filter, document))
            .map(|document| Value::Object(document.clone())))
    }

    async fn find_all(&self) -> Result<Vec<Value>, DomainError> {
        let documents = self.documents.lock().await;
        Ok(documents.iter().cloned().map(Value::Object).collect())
    }

    async fn insert(&self, mut document: Map<String, Value>) -> Result<InsertOutcome, DomainError> {
        let mut documents = self.documents.lock().await;

        let id = document
            .entry(ID_FIELD)
            .or_insert_with(|| Value::String(ObjectId::new().to_hex()))
            .clone();

        if documents.iter().any(|existing| existing.get(ID_FIELD) == Some(&id)) {
            return Err(DomainError::storage(format!("duplicate key: _id {}", id)));
        }

        documents.push(document);
        debug!("Stored document {} in memory", id);

        Ok(InsertOutcome { inserted_id: id })
    }

    async fn update_one(
        &self,
        filter: Map<String, Value>,
        set: Map<String, Value>,
        upsert: bool,
    ) -> Result<UpdateOutcome, DomainError> {
        check_equality_filter(&filter)?;
        let mut documents = self.documents.lock().await;

        if let Some(document) = documents
            .iter_mut()
            .find(|document| matches_equality(&filter, document))
        {
            // Applied to a copy so a failing path leaves the stored document intact.
            let mut updated = document.clone();
            let mut modified = false;
            for (path, value) in set {
                modified |= set_path(&mut updated, &path, value)?;
            }
            *document = updated;
            return Ok(UpdateOutcome {
                matched: 1,
                modified: u64::from(modified),
                upserted: None,
            });
        }

        if !upsert {
            return Ok(UpdateOutcome::unmatched());
        }

        let mut document = upsert_seed(&filter)?;
        for (path, value) in set {
            set_path(&mut document, &path, value)?;
        }
        let id = document
            .entry(ID_FIELD)
            .or_insert_with(|| Value::String(ObjectId::new().to_hex()))
            .clone();
        documents.push(document);

        Ok(UpdateOutcome {
            matched: 0,
            modified: 0,
            upserted: Some(id),
        })
    }

    async fn delete_one(&self, filter: Map<String, Value>) -> Result<DeleteOutcome, DomainError> {
        check_equality_filter(&filter)?;
        let mut documents = self.documents.lock().await;

        let deleted = match documents
            .iter()
            .position(|document| matches_equality(&filter, document))
        {
            Some(index) => {
                documents.remove(index);
                1
            }
            None => 0,
        };

        Ok(DeleteOutcome { deleted })
    }
}

/// Hands out one shared in-memory store.
pub struct InMemoryStoreFactory {
    store: Arc<InMemorySnapshotStore>,
}

impl InMemoryStoreFactory {
    pub fn new(store: Arc<InMemorySnapshotStore>) -> Self {
        Self { store }
    }
}

impl Default for InMemoryStoreFactory {
    fn default() -> Self {
        Self::new(Arc::new(InMemorySnapshotStore::new()))
    }
}

#[async_trait]
impl SnapshotStoreFactory for InMemoryStoreFactory {
    async fn connect(&self) -> Result<Arc<dyn SnapshotStore>, DomainError> {
        debug!("Using in-memory snapshot store");
        Ok(self.store.clone())
    }
}
