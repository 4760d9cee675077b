use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::schema::ContentStore;
use super::types::{Document, FieldValue, QueryOptions, StoreError};
use crate::model::Entity;

/// Row shape for document queries: (id, payload)
type DocRow = (String, String);

fn decode_row<T: DeserializeOwned>(
    collection: &str,
    (id, payload): DocRow,
) -> Result<Document<T>, StoreError> {
    let data = serde_json::from_str(&payload).map_err(|source| StoreError::Decode {
        collection: collection.to_string(),
        id: id.clone(),
        source,
    })?;
    Ok(Document { id, data })
}

/// JSON path for `json_extract`, bound as a query parameter.
/// Dotted field names navigate into nested objects, which no content
/// collection currently uses but SQLite handles for free.
fn json_path(field: &str) -> String {
    format!("$.{}", field)
}

impl ContentStore {
    // ========================================================================
    // One-Shot Reads
    // ========================================================================

    /// Fetch a single document by its store-assigned id.
    ///
    /// `Ok(None)` means the id does not exist in this collection; a failed
    /// query surfaces as `Err` so the two are never conflated.
    pub async fn get_item<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document<T>>, StoreError> {
        let row: Option<DocRow> = sqlx::query_as(
            "SELECT id, payload FROM documents WHERE owner = ? AND collection = ? AND id = ?",
        )
        .bind(&*self.owner)
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| decode_row(collection, r)).transpose()
    }

    /// Fetch the first document where `field == value`.
    ///
    /// When multiple documents match, the oldest insertion wins; callers
    /// that need a specific one should query on a unique field (e.g. `slug`).
    pub async fn get_item_by_field<T: DeserializeOwned>(
        &self,
        collection: &str,
        field: &str,
        value: impl Into<FieldValue>,
    ) -> Result<Option<Document<T>>, StoreError> {
        let query = sqlx::query_as(
            r#"
            SELECT id, payload FROM documents
            WHERE owner = ? AND collection = ? AND json_extract(payload, ?) = ?
            ORDER BY seq
            LIMIT 1
        "#,
        )
        .bind(&*self.owner)
        .bind(collection)
        .bind(json_path(field));

        let query = match value.into() {
            FieldValue::Text(v) => query.bind(v),
            FieldValue::Number(v) => query.bind(v),
            FieldValue::Bool(v) => query.bind(v),
        };

        let row: Option<DocRow> = query.fetch_optional(&self.pool).await?;
        row.map(|r| decode_row(collection, r)).transpose()
    }

    /// Fetch the full ordered result set for a collection.
    ///
    /// This is the one-shot form of the query a subscription re-runs on
    /// every change: sorted by `options.order_by` with insertion order as
    /// the tie-break, capped at `options.limit` when one is supplied.
    pub async fn get_items<T: DeserializeOwned>(
        &self,
        collection: &str,
        options: &QueryOptions,
    ) -> Result<Vec<Document<T>>, StoreError> {
        // LIMIT -1 means "no limit" in SQLite
        let limit = options.limit.map(i64::from).unwrap_or(-1);

        // Direction comes from an enum, never from user input
        let sql = format!(
            r#"
            SELECT id, payload FROM documents
            WHERE owner = ?1 AND collection = ?2
            ORDER BY json_extract(payload, ?3) {}, seq ASC
            LIMIT ?4
        "#,
            options.direction.as_sql()
        );

        let rows: Vec<DocRow> = sqlx::query_as(&sql)
            .bind(&*self.owner)
            .bind(collection)
            .bind(json_path(&options.order_by))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|r| decode_row(collection, r))
            .collect()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Insert a document, returning the newly assigned id.
    ///
    /// The payload must serialize to a JSON object; the store merges in
    /// server-stamped `createdAt`/`updatedAt` set to the moment of the call.
    /// No further shape validation happens here — schema conformance is the
    /// caller's responsibility.
    pub async fn add_item<T: Serialize>(
        &self,
        collection: &str,
        data: &T,
    ) -> Result<String, StoreError> {
        let mut payload = to_object(data)?;
        let now = serde_json::to_value(Utc::now()).map_err(StoreError::Encode)?;
        payload.insert("createdAt".to_string(), now.clone());
        payload.insert("updatedAt".to_string(), now);

        let id = Uuid::new_v4().to_string();
        let body = serde_json::to_string(&Value::Object(payload)).map_err(StoreError::Encode)?;

        sqlx::query("INSERT INTO documents (id, owner, collection, payload) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(&*self.owner)
            .bind(collection)
            .bind(&body)
            .execute(&self.pool)
            .await?;

        tracing::debug!(collection = %collection, id = %id, "added document");
        self.publish_change(collection);
        Ok(id)
    }

    /// Replace a document's payload, preserving `createdAt` and restamping
    /// `updatedAt`. Returns `false` if the id does not exist, including
    /// when a concurrent delete removes the row mid-update.
    pub async fn update_item<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        data: &T,
    ) -> Result<bool, StoreError> {
        let existing: Option<Document<Value>> = self.get_item(collection, id).await?;
        let Some(existing) = existing else {
            return Ok(false);
        };

        let mut payload = to_object(data)?;
        if let Some(created) = existing.data.get("createdAt") {
            payload.insert("createdAt".to_string(), created.clone());
        }
        let now = serde_json::to_value(Utc::now()).map_err(StoreError::Encode)?;
        payload.insert("updatedAt".to_string(), now);

        let body = serde_json::to_string(&Value::Object(payload)).map_err(StoreError::Encode)?;

        let result = sqlx::query(
            "UPDATE documents SET payload = ? WHERE owner = ? AND collection = ? AND id = ?",
        )
        .bind(&body)
        .bind(&*self.owner)
        .bind(collection)
        .bind(id)
        .execute(&self.pool)
        .await?;

        // The read above is unsynchronized: a delete landing in between
        // leaves zero rows touched, and no change happened to publish
        let updated = result.rows_affected() > 0;
        if updated {
            tracing::debug!(collection = %collection, id = %id, "updated document");
            self.publish_change(collection);
        }
        Ok(updated)
    }

    /// Delete a document. Returns `false` if the id does not exist.
    pub async fn delete_item(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let result =
            sqlx::query("DELETE FROM documents WHERE owner = ? AND collection = ? AND id = ?")
                .bind(&*self.owner)
                .bind(collection)
                .bind(id)
                .execute(&self.pool)
                .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::debug!(collection = %collection, id = %id, "deleted document");
            self.publish_change(collection);
        }
        Ok(deleted)
    }

    // ========================================================================
    // Typed Entity Sugar
    // ========================================================================

    /// `get_item` against the entity's own collection.
    pub async fn get<E: Entity>(&self, id: &str) -> Result<Option<Document<E>>, StoreError> {
        self.get_item(E::COLLECTION, id).await
    }

    /// `get_items` against the entity's own collection.
    pub async fn list<E: Entity>(
        &self,
        options: &QueryOptions,
    ) -> Result<Vec<Document<E>>, StoreError> {
        self.get_items(E::COLLECTION, options).await
    }

    /// `add_item` against the entity's own collection.
    pub async fn add<E: Entity>(&self, entity: &E) -> Result<String, StoreError> {
        self.add_item(E::COLLECTION, entity).await
    }
}

/// Serialize the payload and insist on a JSON object.
fn to_object(data: &impl Serialize) -> Result<serde_json::Map<String, Value>, StoreError> {
    match serde_json::to_value(data).map_err(StoreError::Encode)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::NotAnObject(json_type_name(&other))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
