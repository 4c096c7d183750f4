//! # FolioStore
//!
//! A pluggable page-storage layer with:
//! - One file per key, self-describing compression envelope
//! - Optional asynchronous write-behind with read-your-write consistency
//! - Memory-bounded LRU caching with an explicit budget unit
//! - Time-ordered unique key allocation
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Callers                               │
//! │              (tree/index builder, many threads)              │
//! └───────────┬─────────────────────────────────┬───────────────┘
//!             │                                 │
//! ┌───────────▼───────────┐          ┌──────────▼──────────┐
//! │   MemoryBoundCache    │          │     Store trait      │
//! │   (LRU, budgeted)     │          │ (file / memory / …)  │
//! └───────────────────────┘          └──────────┬──────────┘
//!                                               │
//!                            ┌──────────────────┼──────────────┐
//!                            │                  │              │
//!                     ┌──────▼──────┐    ┌──────▼──────┐       │
//!                     │   Overlay   │    │Bounded queue│       │
//!                     │ (pending)   │    │  + worker   │       │
//!                     └─────────────┘    └──────┬──────┘       │
//!                                               │              │
//!                                        ┌──────▼──────────────▼──┐
//!                                        │  Directory on disk     │
//!                                        │  (tag byte + payload)  │
//!                                        └────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod compression;
pub mod page;
pub mod cache;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{FolioError, Result};
pub use config::StoreConfig;
pub use compression::Compression;
pub use page::Page;
pub use cache::{CacheBudget, MemoryBoundCache, MemoryObject};
pub use store::{FileStore, MemoryStore, Store, TimeUuid};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of FolioStore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
