//! # Document Store
//!
//! Embedded in-memory document store behind a connect-once `Store` handle.
//! Collections hold schema-flexible JSON documents keyed by a store-assigned
//! [`ObjectId`]. The handle is established at bootstrap and shared across all
//! in-flight requests.

pub mod collection;
pub mod errors;
pub mod filter;
pub mod memory;
pub mod object_id;
pub mod results;

pub use collection::{Collection, FindOptions, SortKey};
pub use errors::{StoreError, StoreResult};
pub use filter::Filter;
pub use memory::{Store, StoreConfig};
pub use object_id::ObjectId;
pub use results::{DeleteResult, InsertOneResult, UpdateResult};
