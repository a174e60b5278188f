//! In-process [`DocumentStore`] backed by a map of vectors.
//!
//! Mirrors the filter semantics of the Postgres store and is what the test
//! suites and local experiments run against.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{
    CmpOp, Collection, Condition, Document, DocumentStore, Filter, GroupCount, Update,
};

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a document as-is, keeping whatever `id` it carries.
    pub async fn seed(&self, collection: Collection, document: Document) {
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(document);
    }

    pub async fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }
}

fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    value
        .as_str()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|at| at.with_timezone(&Utc))
}

fn satisfies(document: &Document, condition: &Condition) -> bool {
    match condition {
        Condition::Eq { field, value } => document.get(*field) == Some(value),
        Condition::Cmp { field, op, at } => {
            let Some(stored) = document.get(*field).and_then(timestamp) else {
                return false;
            };
            match op {
                CmpOp::Gte => stored >= *at,
                CmpOp::Lte => stored <= *at,
                CmpOp::Lt => stored < *at,
            }
        }
        Condition::Exists { field, present } => document.contains_key(*field) == *present,
        Condition::NotNull { field } => document.get(*field).is_some_and(|v| !v.is_null()),
    }
}

fn matches(document: &Document, filter: &Filter) -> bool {
    filter
        .conditions()
        .iter()
        .all(|condition| satisfies(document, condition))
}

/// Sort key for grouped counts: string keys compare as text, anything else
/// by its JSON rendering.
fn key_order(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(&self, collection: Collection, mut document: Document) -> Result<Uuid> {
        let id = Uuid::new_v4();
        document.insert("id".to_string(), Value::String(id.to_string()));
        self.seed(collection, document).await;
        Ok(id)
    }

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|doc| matches(doc, filter)))
            .cloned())
    }

    async fn find_many(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches(doc, filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64> {
        let collections = self.collections.read().await;
        let count = collections
            .get(&collection)
            .map_or(0, |docs| docs.iter().filter(|doc| matches(doc, filter)).count());
        Ok(count as u64)
    }

    async fn update_one(&self, collection: Collection, filter: &Filter, update: Update) -> Result<bool> {
        let mut collections = self.collections.write().await;
        let Some(document) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|doc| matches(doc, filter)))
        else {
            return Ok(false);
        };

        for (field, value) in update.sets() {
            document.insert(field.clone(), value.clone());
        }
        for field in update.unsets() {
            document.remove(*field);
        }
        Ok(true)
    }

    async fn delete_one(&self, collection: Collection, filter: &Filter) -> Result<bool> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(false);
        };
        match docs.iter().position(|doc| matches(doc, filter)) {
            Some(index) => {
                docs.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_by(
        &self,
        collection: Collection,
        filter: &Filter,
        field: &'static str,
        limit: usize,
    ) -> Result<Vec<GroupCount>> {
        let collections = self.collections.read().await;
        let mut buckets: Vec<GroupCount> = Vec::new();

        for doc in collections
            .get(&collection)
            .into_iter()
            .flatten()
            .filter(|doc| matches(doc, filter))
        {
            let key = doc.get(field).cloned().unwrap_or(Value::Null);
            match buckets.iter_mut().find(|bucket| bucket.key == key) {
                Some(bucket) => bucket.count += 1,
                None => buckets.push(GroupCount { key, count: 1 }),
            }
        }

        buckets.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| key_order(&a.key).cmp(&key_order(&b.key)))
        });
        buckets.truncate(limit);
        Ok(buckets)
    }
}
