//! Postgres-backed [`DocumentStore`].
//!
//! Every collection is a table of `(id UUID, seq BIGSERIAL, doc JSONB)`.
//! `seq` keeps insertion order; filters are evaluated against `doc` and
//! compile to the same `(doc ->> 'field')` expressions the indexes use.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use serde_json::Value;
use sqlx::{types::Json, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    store::{
        timestamp_value, CmpOp, Collection, Condition, Document, DocumentStore, Filter, GroupCount,
        Update,
    },
    DbPool,
};

#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: DbPool,
}

impl PgDocumentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Field names are `&'static str` constants, inlined as literals so the
/// predicates read exactly like the expression indexes in `schema`.
fn push_field(builder: &mut QueryBuilder<'_, Postgres>, field: &str) {
    builder.push(format!("'{}'", field.replace('\'', "''")));
}

fn push_eq(builder: &mut QueryBuilder<'_, Postgres>, field: &str, value: &Value) {
    match value {
        Value::String(text) if field == "id" => match Uuid::parse_str(text) {
            Ok(id) => {
                builder.push("id = ");
                builder.push_bind(id);
            }
            // Not a UUID, so no row can match.
            Err(_) => {
                builder.push("FALSE");
            }
        },
        Value::String(text) => {
            builder.push("doc ->> ");
            push_field(builder, field);
            builder.push(" = ");
            builder.push_bind(text.clone());
        }
        other => {
            builder.push("doc -> ");
            push_field(builder, field);
            builder.push(" = ");
            builder.push_bind(Json(other.clone()));
        }
    }
}

/// Appends ` WHERE ...` for a non-empty filter.
///
/// String equality compares `doc ->> field` as text and `id` goes through
/// the primary key. Timestamps are stored as UTC RFC 3339 strings, so range
/// conditions compare bytewise under the "C" collation.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    for (index, condition) in filter.conditions().iter().enumerate() {
        builder.push(if index == 0 { " WHERE " } else { " AND " });
        match condition {
            Condition::Eq { field, value } => push_eq(builder, field, value),
            Condition::Cmp { field, op, at } => {
                builder.push("(doc ->> ");
                push_field(builder, field);
                builder.push(") COLLATE \"C\" ");
                builder.push(match op {
                    CmpOp::Gte => ">= ",
                    CmpOp::Lte => "<= ",
                    CmpOp::Lt => "< ",
                });
                builder.push_bind(timestamp_text(*at));
            }
            Condition::Exists { field, present } => {
                if !present {
                    builder.push("NOT ");
                }
                builder.push("jsonb_exists(doc, ");
                push_field(builder, field);
                builder.push(")");
            }
            Condition::NotNull { field } => {
                builder.push("jsonb_typeof(doc -> ");
                push_field(builder, field);
                builder.push(") <> 'null'");
            }
        }
    }
}

fn timestamp_text(at: DateTime<Utc>) -> String {
    match timestamp_value(at) {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// Appends `WHERE id = (first matching id)`, used by single-row writes.
fn push_first_match(builder: &mut QueryBuilder<'_, Postgres>, table: &str, filter: &Filter) {
    builder.push(format!(" WHERE id = (SELECT id FROM {table}"));
    push_filter(builder, filter);
    builder.push(" ORDER BY seq LIMIT 1)");
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert_one(&self, collection: Collection, mut document: Document) -> Result<Uuid> {
        let id = Uuid::new_v4();
        document.insert("id".to_string(), Value::String(id.to_string()));

        tracing::debug!(collection = %collection, %id, "inserting document");
        sqlx::query(&format!("INSERT INTO {collection} (id, doc) VALUES ($1, $2)"))
            .bind(id)
            .bind(Json(document))
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>> {
        let mut builder = QueryBuilder::new(format!("SELECT doc FROM {collection}"));
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY seq LIMIT 1");

        let row = builder
            .build_query_scalar::<Json<Document>>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|Json(doc)| doc))
    }

    async fn find_many(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>> {
        let mut builder = QueryBuilder::new(format!("SELECT doc FROM {collection}"));
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY seq");

        let rows = builder
            .build_query_scalar::<Json<Document>>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|Json(doc)| doc).collect())
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64> {
        let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {collection}"));
        push_filter(&mut builder, filter);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(count)?)
    }

    async fn update_one(&self, collection: Collection, filter: &Filter, update: Update) -> Result<bool> {
        let unset: Vec<String> = update.unsets().iter().map(|f| f.to_string()).collect();

        let mut builder = QueryBuilder::new(format!("UPDATE {collection} SET doc = (doc || "));
        builder.push_bind(Json(update.sets().clone()));
        builder.push(") - ");
        builder.push_bind(unset);
        builder.push("::text[]");
        push_first_match(&mut builder, collection.as_str(), filter);

        let result = builder.build().execute(&self.pool).await?;
        tracing::debug!(collection = %collection, rows = result.rows_affected(), "updated document");
        Ok(result.rows_affected() > 0)
    }

    async fn delete_one(&self, collection: Collection, filter: &Filter) -> Result<bool> {
        let mut builder = QueryBuilder::new(format!("DELETE FROM {collection}"));
        push_first_match(&mut builder, collection.as_str(), filter);

        let result = builder.build().execute(&self.pool).await?;
        tracing::debug!(collection = %collection, rows = result.rows_affected(), "deleted document");
        Ok(result.rows_affected() > 0)
    }

    async fn count_by(
        &self,
        collection: Collection,
        filter: &Filter,
        field: &'static str,
        limit: usize,
    ) -> Result<Vec<GroupCount>> {
        let mut builder = QueryBuilder::new("SELECT doc -> ");
        push_field(&mut builder, field);
        builder.push(format!(" AS key, COUNT(*) AS count FROM {collection}"));
        push_filter(&mut builder, filter);
        builder.push(" GROUP BY 1 ORDER BY 2 DESC, 1 ASC LIMIT ");
        builder.push_bind(i64::try_from(limit)?);

        let rows = builder
            .build_query_as::<(Option<Json<Value>>, i64)>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|(key, count)| {
                Ok(GroupCount {
                    key: key.map_or(Value::Null, |Json(key)| key),
                    count: u64::try_from(count)?,
                })
            })
            .collect()
    }
}
