use crate::error::{Error, Result};
use crate::store::{DocumentStore, Order, RawDocument, StoreSubscription};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};
use tokio::sync::broadcast;
use uuid::Uuid;

const SNAPSHOT_CHANNEL_CAPACITY: usize = 32;

/// In-memory implementation of the document store interface.
///
/// Documents keep their insertion order; ordering requested by the caller is
/// applied on read. Every mutation publishes the full collection snapshot to
/// subscribers, matching the push contract of the hosted store.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, Vec<RawDocument>>>,
    watchers: Mutex<HashMap<String, broadcast::Sender<Vec<RawDocument>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn snapshot(&self, collection: &str) -> Vec<RawDocument> {
        self.data
            .read()
            .expect("store lock poisoned")
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn publish(&self, collection: &str) {
        let snapshot = self.snapshot(collection);
        let watchers = self.watchers.lock().expect("watcher lock poisoned");
        if let Some(tx) = watchers.get(collection) {
            // Nobody listening is fine.
            let _ = tx.send(snapshot);
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, fields: JsonValue) -> Result<String> {
        if !fields.is_object() {
            return Err(Error::Store(format!(
                "document for '{}' must be a JSON object",
                collection
            )));
        }
        let id = Uuid::new_v4().to_string();
        {
            let mut data = self.data.write().expect("store lock poisoned");
            data.entry(collection.to_string())
                .or_default()
                .push(RawDocument {
                    id: id.clone(),
                    fields,
                });
        }
        self.publish(collection);
        Ok(id)
    }

    async fn list(&self, collection: &str, order: Order) -> Result<Vec<RawDocument>> {
        Ok(crate::store::sort_documents(self.snapshot(collection), order))
    }

    async fn find(
        &self,
        collection: &str,
        field: &str,
        value: &JsonValue,
        order: Order,
    ) -> Result<Vec<RawDocument>> {
        let matches = self
            .snapshot(collection)
            .into_iter()
            .filter(|doc| doc.fields.get(field) == Some(value))
            .collect();
        Ok(crate::store::sort_documents(matches, order))
    }

    async fn update(&self, collection: &str, id: &str, fields: JsonValue) -> Result<()> {
        let patch = fields
            .as_object()
            .ok_or_else(|| Error::Store("update payload must be a JSON object".to_string()))?
            .clone();
        {
            let mut data = self.data.write().expect("store lock poisoned");
            let docs = data
                .get_mut(collection)
                .ok_or_else(|| Error::NotFound(format!("No document {} in {}", id, collection)))?;
            let doc = docs
                .iter_mut()
                .find(|doc| doc.id == id)
                .ok_or_else(|| Error::NotFound(format!("No document {} in {}", id, collection)))?;
            let target = doc
                .fields
                .as_object_mut()
                .ok_or_else(|| Error::Store("stored document is not an object".to_string()))?;
            for (key, value) in patch {
                target.insert(key, value);
            }
        }
        self.publish(collection);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        // Deleting an absent document succeeds, like the hosted store.
        {
            let mut data = self.data.write().expect("store lock poisoned");
            if let Some(docs) = data.get_mut(collection) {
                docs.retain(|doc| doc.id != id);
            }
        }
        self.publish(collection);
        Ok(())
    }

    fn subscribe(&self, collection: &str, order: Order) -> StoreSubscription {
        let rx = {
            let mut watchers = self.watchers.lock().expect("watcher lock poisoned");
            watchers
                .entry(collection.to_string())
                .or_insert_with(|| broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY).0)
                .subscribe()
        };
        StoreSubscription::new(self.snapshot(collection), rx, order)
    }
}
