//! # Document Store Abstraction
//!
//! Records are kept as JSON documents in named collections. Everything above
//! this module talks to storage through [`DocumentStore`], which keeps the
//! repositories, the referential guard, the hydrator and the lesson query
//! engine independent of the backend in use.
//!
//! Filters are immutable conjunctions of [`Condition`]s. Deriving a narrower
//! filter with [`Filter::and`] returns a new value and leaves the base filter
//! untouched, so one base filter can feed several sibling queries.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use eyre::eyre;
use mockall::automock;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A stored record: a JSON object.
pub type Document = Map<String, Value>;

/// Named collections, one per entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Groups,
    Subjects,
    Students,
    Teachers,
    Schedules,
    Lessons,
    TimeSlots,
}

impl Collection {
    pub const ALL: [Self; 7] = [
        Self::Groups,
        Self::Subjects,
        Self::Students,
        Self::Teachers,
        Self::Schedules,
        Self::Lessons,
        Self::TimeSlots,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Groups => "groups",
            Self::Subjects => "subjects",
            Self::Students => "students",
            Self::Teachers => "teachers",
            Self::Schedules => "schedules",
            Self::Lessons => "lessons",
            Self::TimeSlots => "time_slots",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Gte,
    Lte,
    Lt,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field holds exactly this JSON value.
    Eq { field: &'static str, value: Value },
    /// Field holds a timestamp standing in the given relation to `at`.
    /// Documents without the field never match.
    Cmp {
        field: &'static str,
        op: CmpOp,
        at: DateTime<Utc>,
    },
    /// Field is (or is not) present in the document, whatever its value.
    Exists { field: &'static str, present: bool },
    /// Field is present and not JSON `null`.
    NotNull { field: &'static str },
}

impl Condition {
    pub fn eq(field: &'static str, value: impl Into<Value>) -> Self {
        Self::Eq {
            field,
            value: value.into(),
        }
    }

    pub fn id_eq(field: &'static str, id: Uuid) -> Self {
        Self::eq(field, id.to_string())
    }

    pub fn gte(field: &'static str, at: DateTime<Utc>) -> Self {
        Self::Cmp {
            field,
            op: CmpOp::Gte,
            at,
        }
    }

    pub fn lte(field: &'static str, at: DateTime<Utc>) -> Self {
        Self::Cmp {
            field,
            op: CmpOp::Lte,
            at,
        }
    }

    pub fn lt(field: &'static str, at: DateTime<Utc>) -> Self {
        Self::Cmp {
            field,
            op: CmpOp::Lt,
            at,
        }
    }

    pub fn exists(field: &'static str) -> Self {
        Self::Exists {
            field,
            present: true,
        }
    }

    pub fn missing(field: &'static str) -> Self {
        Self::Exists {
            field,
            present: false,
        }
    }

    pub fn not_null(field: &'static str) -> Self {
        Self::NotNull { field }
    }
}

/// Conjunction of conditions. The empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: Uuid) -> Self {
        Self::all().and(Condition::id_eq("id", id))
    }

    /// Returns a new filter with `condition` appended; `self` is unchanged.
    #[must_use]
    pub fn and(&self, condition: Condition) -> Self {
        let mut conditions = self.conditions.clone();
        conditions.push(condition);
        Self { conditions }
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Merge-patch applied by [`DocumentStore::update_one`].
///
/// Every update refreshes `updated_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    set: Document,
    unset: Vec<&'static str>,
}

impl Update {
    pub fn new() -> Self {
        let mut set = Document::new();
        set.insert("updated_at".to_string(), timestamp_value(Utc::now()));
        Self {
            set,
            unset: Vec::new(),
        }
    }

    pub fn set<T: Serialize + ?Sized>(&mut self, field: &'static str, value: &T) -> eyre::Result<&mut Self> {
        let value = serde_json::to_value(value)?;
        self.unset.retain(|f| *f != field);
        self.set.insert(field.to_string(), value);
        Ok(self)
    }

    pub fn unset(&mut self, field: &'static str) -> &mut Self {
        self.set.remove(field);
        if !self.unset.contains(&field) {
            self.unset.push(field);
        }
        self
    }

    pub fn sets(&self) -> &Document {
        &self.set
    }

    pub fn unsets(&self) -> &[&'static str] {
        &self.unset
    }

    pub fn touches(&self, field: &str) -> bool {
        self.set.contains_key(field) || self.unset.iter().any(|f| *f == field)
    }
}

impl Default for Update {
    fn default() -> Self {
        Self::new()
    }
}

/// One bucket of a grouped count.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupCount {
    /// Value of the grouping field; `Null` for documents lacking it.
    pub key: Value,
    pub count: u64,
}

/// Storage operations the rest of the system relies on.
///
/// Implementations are shared across concurrent requests and must be safe to
/// call from many tasks at once. No operation spans more than one collection
/// and none of them is transactional with respect to another.
#[automock]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Stores `document` under a freshly generated identifier, written into
    /// its `id` field, and returns that identifier.
    async fn insert_one(&self, collection: Collection, document: Document) -> eyre::Result<Uuid>;

    async fn find_one(&self, collection: Collection, filter: &Filter) -> eyre::Result<Option<Document>>;

    /// Matching documents in insertion order.
    async fn find_many(&self, collection: Collection, filter: &Filter) -> eyre::Result<Vec<Document>>;

    async fn count(&self, collection: Collection, filter: &Filter) -> eyre::Result<u64>;

    /// Applies `update` to the first matching document. Returns whether one matched.
    async fn update_one(&self, collection: Collection, filter: &Filter, update: Update) -> eyre::Result<bool>;

    /// Removes the first matching document. Returns whether one matched.
    async fn delete_one(&self, collection: Collection, filter: &Filter) -> eyre::Result<bool>;

    /// Counts matching documents grouped by `field`, largest groups first
    /// (ties broken by key), keeping at most `limit` groups.
    async fn count_by(
        &self,
        collection: Collection,
        filter: &Filter,
        field: &'static str,
        limit: usize,
    ) -> eyre::Result<Vec<GroupCount>>;
}

/// Timestamp encoding used for every stored date: RFC 3339 in UTC.
pub fn timestamp_value(at: DateTime<Utc>) -> Value {
    Value::String(at.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

pub fn to_document<T: Serialize>(value: &T) -> eyre::Result<Document> {
    match serde_json::to_value(value)? {
        Value::Object(document) => Ok(document),
        other => Err(eyre!("expected a JSON object, got {other}")),
    }
}

pub fn from_document<T: DeserializeOwned>(document: Document) -> eyre::Result<T> {
    Ok(serde_json::from_value(Value::Object(document))?)
}
