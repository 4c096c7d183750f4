//! In-memory store
//!
//! Map-backed sibling of [`FileStore`](super::FileStore) with the
//! identical contract, minus durability: everything lives in process
//! memory and is gone when the store is dropped. Useful for tests and
//! for callers assembling a store stack without a disk tier.
//!
//! Byte-level record access is not supported — there are no encoded
//! records here, only pages.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::compression::Compression;
use crate::config::StoreConfig;
use crate::error::{FolioError, Result};
use crate::page::Page;

use super::id::TimeUuid;
use super::Store;

/// In-memory page store
pub struct MemoryStore {
    config: StoreConfig,
    pages: RwLock<HashMap<String, Page>>,
    write_count: AtomicU64,
    read_count: AtomicU64,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self {
            config: StoreConfig::default(),
            pages: RwLock::new(HashMap::new()),
            write_count: AtomicU64::new(0),
            read_count: AtomicU64::new(0),
        }
    }

    /// Number of resident pages
    pub fn len(&self) -> usize {
        self.pages.read().len()
    }

    /// Whether the store holds no pages
    pub fn is_empty(&self) -> bool {
        self.pages.read().is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn get_if_exists(&self, key: &str) -> Result<Option<Page>> {
        self.read_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.pages.read().get(key).map(Page::copy))
    }

    fn put(&self, key: &str, page: &Page) -> Result<()> {
        self.write_count.fetch_add(1, Ordering::SeqCst);
        self.pages.write().insert(key.to_string(), page.copy());
        Ok(())
    }

    fn supports_byte_operations(&self) -> bool {
        false
    }

    fn get_bytes(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Err(FolioError::Unsupported("byte reads on MemoryStore"))
    }

    fn put_bytes(&self, _key: &str, _data: &[u8]) -> Result<()> {
        Err(FolioError::Unsupported("byte writes on MemoryStore"))
    }

    fn remove(&self, keys: &HashSet<String>) -> Result<()> {
        let mut pages = self.pages.write();
        for key in keys {
            self.write_count.fetch_add(1, Ordering::SeqCst);
            pages.remove(key);
        }
        Ok(())
    }

    fn remove_all(&self) -> Result<()> {
        self.pages.write().clear();
        Ok(())
    }

    fn key_set(&self) -> Result<HashSet<String>> {
        Ok(self.pages.read().keys().cloned().collect())
    }

    fn new_file_name(&self) -> String {
        TimeUuid::time_based_version7().to_short_string()
    }

    fn write_count(&self) -> u64 {
        self.write_count.load(Ordering::SeqCst)
    }

    fn read_count(&self) -> u64 {
        self.read_count.load(Ordering::SeqCst)
    }

    fn set_write_compression(&self, _compression: Compression) {
        // nothing is encoded in memory
    }

    fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn close(&self) -> Result<()> {
        Ok(())
    }
}

impl std::fmt::Display for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("memory")
    }
}
