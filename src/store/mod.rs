mod documents;
mod schema;
mod subscribe;
mod types;

pub use schema::ContentStore;
pub use subscribe::{SnapshotResult, Subscription};
pub use types::{ChangeEvent, Document, FieldValue, QueryOptions, SortDirection, StoreError};
