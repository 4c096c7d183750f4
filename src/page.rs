//! Page value
//!
//! The unit stored and retrieved by a [`Store`](crate::store::Store):
//! an opaque binary blob with a stable serialized form and a declared
//! memory footprint.
//!
//! A page is immutable once persisted. `copy()` produces an independent
//! value with no shared mutable state, so a caller can keep mutating its
//! own working copy after handing a page to the write-behind worker.

use serde::{Deserialize, Serialize};

use crate::cache::MemoryObject;
use crate::error::{FolioError, Result};

/// Fixed per-page bookkeeping overhead counted on top of the payload
///
/// Rough allowance for the container entry, the key, and the Vec header.
const PAGE_MEMORY_OVERHEAD: u64 = 128;

/// An opaque, page-sized binary unit stored under a single key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    data: Vec<u8>,
}

impl Page {
    /// Create a page from raw payload bytes
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// The page payload
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the page, returning its payload
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Serialize to the stable binary form
    ///
    /// Invariant: `from_bytes(to_bytes(p)) == p` for every page.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| FolioError::Serialization(e.to_string()))
    }

    /// Deserialize from the stable binary form
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| FolioError::Serialization(e.to_string()))
    }

    /// An independent copy with no shared mutable state
    ///
    /// Safe to hand to a concurrent writer while the caller continues to
    /// work with the original.
    pub fn copy(&self) -> Self {
        Self {
            data: self.data.clone(),
        }
    }
}

impl From<Vec<u8>> for Page {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl MemoryObject for Page {
    fn estimated_memory(&self) -> u64 {
        self.data.len() as u64 + PAGE_MEMORY_OVERHEAD
    }
}
