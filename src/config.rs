//! Configuration for FolioStore
//!
//! Centralized, construction-time configuration with sensible defaults.
//! A store's configuration is fixed when the store is opened and is
//! exposed unchanged through [`Store::config`](crate::store::Store::config)
//! for introspection by callers and tests.

use std::path::PathBuf;

use crate::compression::Compression;

/// Configuration for a store instance
#[derive(Debug, Clone)]
pub struct StoreConfig {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Base directory for page files (created if absent)
    ///
    /// One regular file per key, file name equal to the key. The
    /// directory is exclusively owned by one store instance for its
    /// lifetime.
    pub dir: PathBuf,

    // -------------------------------------------------------------------------
    // Write-Behind Configuration
    // -------------------------------------------------------------------------
    /// Select asynchronous (write-behind) mode
    ///
    /// When true, `put` hands writes to a background worker through a
    /// bounded queue instead of performing the I/O inline.
    pub async_write: bool,

    /// Capacity of the write-behind submission queue
    ///
    /// A full queue blocks the submitting thread until the worker frees
    /// a slot; this is the store's sole backpressure mechanism.
    pub queue_capacity: usize,

    // -------------------------------------------------------------------------
    // Record Configuration
    // -------------------------------------------------------------------------
    /// Compression scheme for future writes
    ///
    /// Records written earlier under a different scheme remain readable;
    /// each record self-describes its scheme.
    pub write_compression: Compression,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./foliostore_data"),
            async_write: false,
            queue_capacity: 100,
            write_compression: Compression::None,
        }
    }
}

impl StoreConfig {
    /// Create a new config builder
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }
}

/// Builder for StoreConfig
#[derive(Default)]
pub struct StoreConfigBuilder {
    config: StoreConfig,
}

impl StoreConfigBuilder {
    /// Set the base directory for page files
    pub fn dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.dir = path.into();
        self
    }

    /// Enable or disable write-behind mode
    pub fn async_write(mut self, enabled: bool) -> Self {
        self.config.async_write = enabled;
        self
    }

    /// Set the write-behind queue capacity
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity;
        self
    }

    /// Set the compression scheme for future writes
    pub fn write_compression(mut self, compression: Compression) -> Self {
        self.config.write_compression = compression;
        self
    }

    pub fn build(self) -> StoreConfig {
        self.config
    }
}
