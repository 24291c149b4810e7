pub mod collection;
pub mod files;
pub mod memory;

pub use collection::{Collection, CollectionWatcher};
pub use files::FileStore;
pub use memory::MemoryStore;

use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use std::cmp::Ordering;
use tokio::sync::broadcast;

/// Collection names used by the hosted document store.
pub mod collections {
    pub const CANDIDATES: &str = "candidates";
    pub const JOBS: &str = "jobs";
    pub const STAGES: &str = "stages";
    pub const CANDIDATE_STAGES: &str = "candidateStages";
    pub const CANDIDATE_NOTES: &str = "candidateNotes";
    pub const BATCHES: &str = "batches";
    pub const STAGE_ASSIGNMENTS: &str = "stageAssignments";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Ordering applied by the store when reading or subscribing to a collection.
#[derive(Debug, Clone, Copy)]
pub struct Order {
    pub field: &'static str,
    pub direction: Direction,
}

impl Order {
    pub fn asc(field: &'static str) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: &'static str) -> Self {
        Self {
            field,
            direction: Direction::Desc,
        }
    }
}

/// One document as the store hands it back: generated id plus the raw fields.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub id: String,
    pub fields: JsonValue,
}

/// Interface of the hosted document collection store.
///
/// Collections are schemaless; ids are generated on insert. There is no
/// point read and no multi-document transaction. `update` merges top-level
/// fields into an existing document and reports a missing id; `delete` is
/// idempotent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(&self, collection: &str, fields: JsonValue) -> Result<String>;

    async fn list(&self, collection: &str, order: Order) -> Result<Vec<RawDocument>>;

    async fn find(
        &self,
        collection: &str,
        field: &str,
        value: &JsonValue,
        order: Order,
    ) -> Result<Vec<RawDocument>>;

    async fn update(&self, collection: &str, id: &str, fields: JsonValue) -> Result<()>;

    async fn delete(&self, collection: &str, id: &str) -> Result<()>;

    fn subscribe(&self, collection: &str, order: Order) -> StoreSubscription;
}

/// Push subscription over one collection. The first `recv` resolves with the
/// snapshot taken at subscription time; every later one with the snapshot
/// published after a mutation. Dropping the handle releases the underlying
/// channel receiver, so teardown is guaranteed on every exit path.
pub struct StoreSubscription {
    initial: Option<Vec<RawDocument>>,
    rx: broadcast::Receiver<Vec<RawDocument>>,
    order: Order,
}

impl StoreSubscription {
    pub fn new(
        initial: Vec<RawDocument>,
        rx: broadcast::Receiver<Vec<RawDocument>>,
        order: Order,
    ) -> Self {
        Self {
            initial: Some(initial),
            rx,
            order,
        }
    }

    pub async fn recv(&mut self) -> Result<Vec<RawDocument>> {
        if let Some(snapshot) = self.initial.take() {
            return Ok(sort_documents(snapshot, self.order));
        }
        loop {
            match self.rx.recv().await {
                Ok(snapshot) => return Ok(sort_documents(snapshot, self.order)),
                // Snapshots are self-contained, so a lagged receiver just
                // takes the next one.
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => {
                    return Err(Error::Store("subscription closed".to_string()))
                }
            }
        }
    }
}

pub(crate) fn sort_documents(mut docs: Vec<RawDocument>, order: Order) -> Vec<RawDocument> {
    docs.sort_by(|a, b| {
        let lhs = a.fields.get(order.field).unwrap_or(&JsonValue::Null);
        let rhs = b.fields.get(order.field).unwrap_or(&JsonValue::Null);
        let ord = compare_values(lhs, rhs);
        match order.direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    });
    docs
}

fn compare_values(lhs: &JsonValue, rhs: &JsonValue) -> Ordering {
    match (lhs, rhs) {
        (JsonValue::Number(a), JsonValue::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (JsonValue::String(a), JsonValue::String(b)) => {
            // Timestamps are stored in RFC 3339; compare them as instants so
            // mixed sub-second precision cannot skew the order.
            match (parse_timestamp(a), parse_timestamp(b)) {
                (Some(a), Some(b)) => a.cmp(&b),
                _ => a.cmp(b),
            }
        }
        (JsonValue::Null, JsonValue::Null) => Ordering::Equal,
        (JsonValue::Null, _) => Ordering::Less,
        (_, JsonValue::Null) => Ordering::Greater,
        (a, b) => a.to_string().cmp(&b.to_string()),
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
