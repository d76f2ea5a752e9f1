use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Client, Collection};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::application::{SnapshotStore, SnapshotStoreFactory};
use crate::connector::config::ConnectionSettings;
use crate::domain::{DeleteOutcome, DomainError, Filter, InsertOutcome, UpdateOutcome};

/// Snapshot collection in MongoDB.
pub struct MongoSnapshotStore {
    client: Client,
    collection: Collection<Document>,
}

impl MongoSnapshotStore {
    /// Connect and ping. Both steps share `timeout`.
    pub async fn connect(
        uri: &str,
        database: &str,
        collection: &str,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let connect = async {
            let client = Client::with_uri_str(uri)
                .await
                .map_err(|e| DomainError::connection(e.to_string()))?;

            let db = client.database(database);
            db.run_command(doc! { "ping": 1 })
                .await
                .map_err(|e| DomainError::connection(format!("ping failed: {}", e)))?;

            Ok::<_, DomainError>((client, db))
        };

        let (client, db) = tokio::time::timeout(timeout, connect)
            .await
            .map_err(|_| DomainError::connection(format!("connect timed out after {:?}", timeout)))??;

        info!("Connected to MongoDB collection {}.{}", database, collection);

        Ok(Self {
            collection: db.collection::<Document>(collection),
            client,
        })
    }
}

fn storage_error(operation: &str, e: mongodb::error::Error) -> DomainError {
    DomainError::storage(format!("{} failed: {}", operation, e))
}

/// Translate the store-agnostic filter into a query document.
pub fn filter_to_document(filter: &Filter) -> Document {
    let branches = |children: &[Filter]| {
        Bson::Array(
            children
                .iter()
                .map(|child| Bson::Document(filter_to_document(child)))
                .collect(),
        )
    };

    let mut document = Document::new();
    match filter {
        Filter::All => {}
        Filter::Eq { field, value } => {
            document.insert(field.clone(), value.clone());
        }
        Filter::Or(children) => {
            document.insert("$or", branches(children));
        }
        Filter::And(children) => {
            document.insert("$and", branches(children));
        }
    }
    document
}

/// Parse a JSON object as extended JSON, so `{"$oid": ...}` becomes an
/// ObjectId.
pub fn json_to_document(map: Map<String, Value>) -> Result<Document, DomainError> {
    match Bson::try_from(Value::Object(map)) {
        Ok(Bson::Document(document)) => Ok(document),
        Ok(other) => Err(DomainError::invalid_input(format!(
            "expected a document, got {:?}",
            other.element_type()
        ))),
        Err(e) => Err(DomainError::invalid_input(format!("invalid document: {}", e))),
    }
}

/// Render a stored value as plain JSON. ObjectIds become hex strings and
/// numbers stay numbers; everything else uses relaxed extended JSON.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(document) => document_to_json(document),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Double(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Bson::Int32(i) => Value::from(i),
        Bson::Int64(i) => Value::from(i),
        other => other.into_relaxed_extjson(),
    }
}

fn document_to_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

#[async_trait]
impl SnapshotStore for MongoSnapshotStore {
    async fn find_one(&self, filter: &Filter) -> Result<Option<Value>, DomainError> {
        let query = filter_to_document(filter);
        debug!("find_one {}", query);

        let found = self
            .collection
            .find_one(query)
            .await
            .map_err(|e| storage_error("find_one", e))?;

        Ok(found.map(document_to_json))
    }

    async fn find_all(&self) -> Result<Vec<Value>, DomainError> {
        let cursor = self
            .collection
            .find(Document::new())
            .await
            .map_err(|e| storage_error("find", e))?;

        let documents: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| storage_error("find", e))?;

        Ok(documents.into_iter().map(document_to_json).collect())
    }

    async fn insert(&self, document: Map<String, Value>) -> Result<InsertOutcome, DomainError> {
        let document = json_to_document(document)?;

        let result = self
            .collection
            .insert_one(document)
            .await
            .map_err(|e| storage_error("insert_one", e))?;

        Ok(InsertOutcome {
            inserted_id: bson_to_json(result.inserted_id),
        })
    }

    async fn update_one(
        &self,
        filter: Map<String, Value>,
        set: Map<String, Value>,
        upsert: bool,
    ) -> Result<UpdateOutcome, DomainError> {
        let filter = json_to_document(filter)?;
        let set = json_to_document(set)?;

        let result = self
            .collection
            .update_one(filter, doc! { "$set": set })
            .upsert(upsert)
            .await
            .map_err(|e| storage_error("update_one", e))?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
            upserted: result.upserted_id.map(bson_to_json),
        })
    }

    async fn delete_one(&self, filter: Map<String, Value>) -> Result<DeleteOutcome, DomainError> {
        let filter = json_to_document(filter)?;

        let result = self
            .collection
            .delete_one(filter)
            .await
            .map_err(|e| storage_error("delete_one", e))?;

        Ok(DeleteOutcome {
            deleted: result.deleted_count,
        })
    }

    async fn shutdown(&self) {
        self.client.clone().shutdown().await;
    }
}

/// Resolves the connection string and opens a [`MongoSnapshotStore`].
pub struct MongoStoreFactory {
    settings: ConnectionSettings,
    connect_timeout: Duration,
}

impl MongoStoreFactory {
    pub fn new(settings: ConnectionSettings, connect_timeout: Duration) -> Self {
        Self {
            settings,
            connect_timeout,
        }
    }
}

#[async_trait]
impl SnapshotStoreFactory for MongoStoreFactory {
    async fn connect(&self) -> Result<Arc<dyn SnapshotStore>, DomainError> {
        let uri = self.settings.resolve_uri()?;
        let database = self.settings.database();
        let collection = self.settings.collection();

        let store =
            MongoSnapshotStore::connect(&uri, &database, &collection, self.connect_timeout).await?;
        Ok(Arc::new(store))
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::oid::ObjectId;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_filter_to_document_shapes() {
        assert_eq!(filter_to_document(&Filter::All), Document::new());

        let filter = Filter::And(vec![
            Filter::Or(vec![
                Filter::eq("month", "5"),
                Filter::eq("data.month", "5"),
            ]),
            Filter::eq("data.username", "alice"),
        ]);

        assert_eq!(
            filter_to_document(&filter),
            doc! {
                "$and": [
                    { "$or": [ { "month": "5" }, { "data.month": "5" } ] },
                    { "data.username": "alice" },
                ]
            }
        );
    }

    #[test]
    fn test_json_to_document_reads_object_ids() {
        let hex = "65a1b2c3d4e5f60718293a4b";
        let document = json_to_document(
            json!({"_id": {"$oid": hex}, "web": "WEB1"})
                .as_object()
                .cloned()
                .unwrap(),
        )
        .unwrap();

        assert_eq!(
            document.get_object_id("_id").unwrap(),
            ObjectId::parse_str(hex).unwrap()
        );
        assert_eq!(document.get_str("web").unwrap(), "WEB1");
    }

    #[test]
    fn test_bson_to_json_renders_plain_values() {
        let oid = ObjectId::new();
        let rendered = bson_to_json(Bson::Document(doc! {
            "_id": oid,
            "betAmt": -542668096.59,
            "count": 3,
            "data": [ { "username": "user_demo" } ],
        }));

        assert_eq!(
            rendered,
            json!({
                "_id": oid.to_hex(),
                "betAmt": -542668096.59,
                "count": 3,
                "data": [ { "username": "user_demo" } ]
            })
        );
    }
}
