//! Store abstraction and backends
//!
//! The capability interface all page-storage backends implement, plus
//! the backends themselves:
//! - [`FileStore`] — one file per key, with an optional write-behind mode
//! - [`MemoryStore`] — map-backed sibling, same contract, no durability
//!
//! Callers hold a `dyn Store` (or a concrete backend) and never depend
//! on backend internals.

use std::collections::HashSet;

use crate::compression::Compression;
use crate::config::StoreConfig;
use crate::error::Result;
use crate::page::Page;

pub mod file;
pub mod id;
pub mod memory;

pub use file::FileStore;
pub use id::TimeUuid;
pub use memory::MemoryStore;

/// Capability interface for page-storage backends
///
/// Implementations are internally thread-safe: all operations take
/// `&self` and may be called from arbitrary threads concurrently.
/// Absence is never an error — reads of missing or tombstoned keys
/// return `Ok(None)`.
pub trait Store: Send + Sync {
    /// Typed read; `Ok(None)` for a missing or tombstoned key
    ///
    /// Errors only for an unreadable or corrupt record.
    fn get_if_exists(&self, key: &str) -> Result<Option<Page>>;

    /// Upsert a page under a key
    ///
    /// Durability semantics depend on the backend mode: inline for
    /// synchronous backends, queued for write-behind. The store takes
    /// its own copy; the caller keeps ownership of `page`.
    fn put(&self, key: &str, page: &Page) -> Result<()>;

    /// Whether raw record access (`get_bytes`/`put_bytes`) is available
    fn supports_byte_operations(&self) -> bool;

    /// Raw read of the stored record (scheme tag + payload), bypassing
    /// page deserialization
    fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Raw write of an already-encoded record, bypassing page
    /// serialization and compression
    fn put_bytes(&self, key: &str, data: &[u8]) -> Result<()>;

    /// Delete the given keys; removing an absent key is a no-op
    fn remove(&self, keys: &HashSet<String>) -> Result<()>;

    /// Delete every key in the store
    fn remove_all(&self) -> Result<()>;

    /// Enumerate currently known keys
    ///
    /// Snapshot semantics: no guarantee against concurrent mutation.
    fn key_set(&self) -> Result<HashSet<String>>;

    /// Allocate a fresh, collision-free, time-ordered key
    fn new_file_name(&self) -> String;

    /// Completed write operations since construction (monotone)
    fn write_count(&self) -> u64;

    /// Completed read operations since construction (monotone)
    fn read_count(&self) -> u64;

    /// Select the compression scheme for future writes
    ///
    /// Previously written records remain readable under any scheme.
    fn set_write_compression(&self, compression: Compression);

    /// The backend's construction-time configuration
    fn config(&self) -> &StoreConfig;

    /// Graceful shutdown: drain pending work, then release resources
    ///
    /// Idempotent. No write submitted before `close` is dropped.
    fn close(&self) -> Result<()>;
}
