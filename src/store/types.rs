use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Store-specific errors with user-friendly messages.
///
/// Reads return `Result<Option<Document<T>>, StoreError>` so callers can
/// distinguish a genuinely missing document (`Ok(None)`) from a failed
/// query (`Err(_)`) and apply their own retry policy.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another process has the content database locked
    #[error("Another process appears to be using the content database. Please close it and try again.")]
    InstanceLocked,

    /// Migration failed
    #[error("Database migration failed: {0}")]
    Migration(String),

    /// Document payloads must be JSON objects so the store can stamp
    /// `createdAt`/`updatedAt` alongside the caller's fields
    #[error("Document payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// A stored payload failed to decode into the requested entity type
    #[error("Failed to decode document '{id}' in collection '{collection}': {source}")]
    Decode {
        collection: String,
        id: String,
        #[source]
        source: serde_json::Error,
    },

    /// The caller's payload failed to serialize
    #[error("Failed to encode document payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// Generic database error
    #[error("Database error: {0}")]
    Other(#[from] sqlx::Error),
}

impl StoreError {
    /// Check if a sqlx error indicates database locking
    pub(crate) fn from_sqlx(err: sqlx::Error) -> Self {
        let error_string = err.to_string().to_lowercase();

        // SQLITE_BUSY (5): database is locked
        // SQLITE_LOCKED (6): database table is locked
        // SQLITE_CANTOPEN (14): unable to open database file
        if error_string.contains("database is locked")
            || error_string.contains("database table is locked")
            || error_string.contains("sqlite_busy")
            || error_string.contains("sqlite_locked")
            || error_string.contains("unable to open database file")
        {
            return StoreError::InstanceLocked;
        }

        StoreError::Other(err)
    }
}

// ============================================================================
// Documents
// ============================================================================

/// A stored document: the store-assigned opaque id plus the decoded payload.
///
/// Mirrors the `{id, ...fields}` shape delivered to subscription callbacks.
/// The id is assigned at insert time and is not knowable beforehand.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<T> {
    pub id: String,
    pub data: T,
}

/// Typed value for field-equality lookups.
///
/// SQLite compares `json_extract` results by type, so the bind must carry
/// the caller's intended type rather than a stringified form.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Number(v as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

// ============================================================================
// Query Options
// ============================================================================

/// Sort direction for ordered queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// SQL keyword for interpolation into ORDER BY (never user-supplied)
    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// Ordering and row-cap options for list queries and subscriptions.
///
/// Defaults to ascending by the `order` field, no limit — the convention
/// every content collection follows. Ties on the order field are broken by
/// insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    /// Payload field to sort by
    pub order_by: String,
    pub direction: SortDirection,
    /// Row cap; `None` returns the full result set
    pub limit: Option<u32>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            order_by: "order".to_string(),
            direction: SortDirection::Ascending,
            limit: None,
        }
    }
}

impl QueryOptions {
    pub fn order_by(field: &str) -> Self {
        Self {
            order_by: field.to_string(),
            ..Self::default()
        }
    }

    pub fn descending(mut self) -> Self {
        self.direction = SortDirection::Descending;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

// ============================================================================
// Change Events
// ============================================================================

/// Published on the store's change bus after every committed mutation.
///
/// Carries only the collection name: subscribers re-run their own query
/// rather than patching incrementally, so the event needs no row data.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub collection: Arc<str>,
}
