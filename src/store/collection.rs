use crate::error::{Error, Result};
use crate::store::{DocumentStore, Order, RawDocument, StoreSubscription};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

/// Typed access to one document collection.
///
/// Values are serde round-tripped through the store's JSON documents; the
/// generated document id is injected into the decoded value under `id`.
/// Every remote call carries an explicit deadline.
pub struct Collection<T> {
    store: Arc<dyn DocumentStore>,
    name: &'static str,
    timeout: Duration,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            name: self.name,
            timeout: self.timeout,
            _entity: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> Collection<T> {
    pub fn new(store: Arc<dyn DocumentStore>, name: &'static str, timeout: Duration) -> Self {
        Self {
            store,
            name,
            timeout,
            _entity: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    async fn deadline<R>(&self, fut: impl Future<Output = Result<R>>) -> Result<R> {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| {
                Error::Timeout(format!(
                    "call on collection '{}' exceeded {}s",
                    self.name,
                    self.timeout.as_secs()
                ))
            })?
    }

    /// Inserts a document and returns the store-generated id. Any `id` field
    /// on the payload is dropped; the store owns identity.
    pub async fn add<P: Serialize>(&self, payload: &P) -> Result<String> {
        let mut fields = serde_json::to_value(payload)?;
        if let Some(object) = fields.as_object_mut() {
            object.remove("id");
        }
        self.deadline(self.store.insert(self.name, fields)).await
    }

    pub async fn list(&self, order: Order) -> Result<Vec<T>> {
        let docs = self.deadline(self.store.list(self.name, order)).await?;
        docs.into_iter().map(decode_document).collect()
    }

    pub async fn find_by(
        &self,
        field: &'static str,
        value: JsonValue,
        order: Order,
    ) -> Result<Vec<T>> {
        let docs = self
            .deadline(self.store.find(self.name, field, &value, order))
            .await?;
        docs.into_iter().map(decode_document).collect()
    }

    /// The store interface has no point read; resolving one document scans
    /// the collection, the same way the dashboard panels do.
    pub async fn get(&self, id: &str) -> Result<Option<T>> {
        let docs = self
            .deadline(self.store.list(self.name, Order::asc("createdAt")))
            .await?;
        docs.into_iter()
            .find(|doc| doc.id == id)
            .map(decode_document)
            .transpose()
    }

    pub async fn update(&self, id: &str, fields: JsonValue) -> Result<()> {
        self.deadline(self.store.update(self.name, id, fields)).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.deadline(self.store.delete(self.name, id)).await
    }

    pub fn watch(&self, order: Order) -> CollectionWatcher<T> {
        CollectionWatcher {
            inner: self.store.subscribe(self.name, order),
            _entity: PhantomData,
        }
    }
}

/// Typed wrapper over a store subscription. Dropping it tears the
/// subscription down.
pub struct CollectionWatcher<T> {
    inner: StoreSubscription,
    _entity: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> CollectionWatcher<T> {
    pub async fn recv(&mut self) -> Result<Vec<T>> {
        let docs = self.inner.recv().await?;
        docs.into_iter().map(decode_document).collect()
    }
}

fn decode_document<T: DeserializeOwned>(doc: RawDocument) -> Result<T> {
    let mut fields = doc.fields;
    match fields.as_object_mut() {
        Some(object) => {
            object.insert("id".to_string(), json!(doc.id));
        }
        None => {
            return Err(Error::Store(format!(
                "document {} is not a JSON object",
                doc.id
            )))
        }
    }
    Ok(serde_json::from_value(fields)?)
}
