//! vitrine — a single-owner portfolio content store.
//!
//! The store keeps portfolio content (projects, blog posts, achievements,
//! gallery files, …) as JSON documents in SQLite, scoped to one configured
//! owner identity. Pages read through live collection queries that
//! redeliver the full ordered result set on every change; the only inbound
//! write from the public site is the contact form.
//!
//! ```no_run
//! use vitrine::model::Project;
//! use vitrine::store::{ContentStore, QueryOptions};
//!
//! # async fn demo() -> Result<(), vitrine::store::StoreError> {
//! let store = ContentStore::open("content.db", "ankit").await?;
//! let sub = store.watch::<Project, _>(QueryOptions::default(), |snapshot| {
//!     if let Ok(projects) = snapshot {
//!         println!("{} projects", projects.len());
//!     }
//! });
//! // ... later, when the page goes away:
//! sub.cancel();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod contact;
pub mod model;
pub mod store;
pub mod util;
pub mod view;

pub use config::Config;
pub use contact::{ContactError, ContactForm, ContactFormError};
pub use store::{ContentStore, Document, QueryOptions, SortDirection, StoreError, Subscription};
pub use view::{CardItem, ListView};
