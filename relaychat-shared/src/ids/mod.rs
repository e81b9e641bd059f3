//! # Identifier reconciliation
//!
//! The gateway hands out thread identifiers in more than one shape: newer
//! services return canonical UUIDs while the thread service still emits
//! 24-character Mongo object ids. The UI keys selection, list rows and routes
//! on a single identifier, so every non-canonical id is paired with a locally
//! generated UUID that is remembered in a durable key/value store.
//!
//! Three pieces:
//!
//! * [`MappingStore`] is the persistence port (browser storage, a file, memory).
//! * [`IdGenerator`] supplies fresh local ids.
//! * [`ReconciliationCache`] ties them together with `resolve` and `clear`.

pub mod cache;
pub mod canonical;
pub mod errors;
pub mod generator;
pub mod store;

pub use cache::{DEFAULT_STORAGE_KEY, MappingTable, ReconciliationCache};
pub use canonical::{CANONICAL_LEN, is_canonical};
pub use errors::{StoreError, StoreResult};
pub use generator::{IdGenerator, RandomIdGenerator, SeededIdGenerator};
#[cfg(not(target_arch = "wasm32"))]
pub use store::{FileStore, default_store_path};
pub use store::{MappingStore, MemoryStore};
