//! # Storage Layer
//!
//! The [`ObjectStore`] owns every live [`Record`](crate::model::Record),
//! keyed by `<Kind>.<id>`. Raw I/O sits behind the [`StorageBackend`] trait
//! so the store logic can be tested without touching the filesystem.
//!
//! ## Lifecycle
//!
//! 1. Construct with a backend.
//! 2. [`ObjectStore::restore`] once at start-up.
//! 3. [`ObjectStore::persist`] after every mutating command. There is no
//!    implicit or background write.
//!
//! ## Restore Tolerance
//!
//! - No document: start empty.
//! - Document that is not a JSON object: start empty (logged at warn).
//! - Entry naming a type outside the closed [`Kind`](crate::model::Kind)
//!   set, or an entry missing its id or timestamps: the restore fails and
//!   nothing is loaded.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one JSON file, replaced atomically on persist.
//! - [`memory::InMemoryStore`]: for testing logic without filesystem I/O.
//!
//! ## Document Format
//!
//! ```text
//! {
//!   "User.0d0b6a2c-...": { "id": "0d0b6a2c-...", "created_at": "...", ..., "type_name": "User" },
//!   "Place.7f3e...":     { ... }
//! }
//! ```

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod object_store;

pub use backend::StorageBackend;
pub use fs::FileStore;
pub use memory::InMemoryStore;
pub use object_store::ObjectStore;
