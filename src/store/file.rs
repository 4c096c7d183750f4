//! File-backed store
//!
//! Persists each key as one regular file in a configured directory.
//! File contents are a self-describing record: one compression tag byte
//! followed by the (possibly compressed) serialized page bytes. A
//! zero-length file is a tombstone — "key existed, now removed" — and
//! reads as absence, distinct from the file never having existed.
//!
//! ## Modes
//!
//! - **Synchronous** (default): `put` compresses and writes inline; the
//!   caller observes durability-or-failure directly.
//! - **Write-behind** (`async_write`): `put` parks an independent copy
//!   of the page in the pending-write overlay and submits a task to a
//!   bounded queue. One dedicated worker drains the queue in FIFO
//!   order, writes the file, then clears the overlay entry — but only
//!   if no newer submission for the same key has replaced it (entries
//!   carry sequence numbers). Reads consult the overlay before disk,
//!   so a caller always observes its own writes. A full queue blocks
//!   the submitter; that is the store's only backpressure.
//!
//! Removes in write-behind mode travel the same queue as tombstone
//! tasks (flushed as zero-length records), so put/remove interleavings
//! on one key resolve in submission order.
//!
//! ## Failure policy
//!
//! Synchronous I/O failures surface to the caller of the operation that
//! triggered them; there are no retries at this layer. A background
//! flush failure has no caller to return to: it is logged and the
//! worker continues, leaving the overlay entry in place so readers keep
//! seeing the submitted value instead of stale disk state. A `put` or
//! `close` against a store whose worker is gone fails with
//! [`FolioError::Closed`] — a write is never silently dropped.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam::channel::{bounded, Receiver, Sender};
use parking_lot::{Mutex, RwLock};

use crate::compression::Compression;
use crate::config::StoreConfig;
use crate::error::{FolioError, Result};
use crate::page::Page;

use super::id::TimeUuid;
use super::Store;

/// A value awaiting its background flush
enum Pending {
    /// A page submitted by `put`
    Write(Page),
    /// A removal submitted by `remove`; flushed as a zero-length record
    Tombstone,
}

struct PendingEntry {
    pending: Pending,
    /// Submission sequence number; a flush clears the entry only if
    /// this still matches, so an older flush never clears a newer value
    seq: u64,
}

/// Pending-write overlay: the in-memory record of write-behind writes
/// not yet durable, consulted by every read
#[derive(Default)]
struct Overlay {
    entries: RwLock<HashMap<String, PendingEntry>>,
}

impl Overlay {
    fn record(&self, key: &str, pending: Pending, seq: u64) {
        self.entries
            .write()
            .insert(key.to_string(), PendingEntry { pending, seq });
    }

    /// `None` — no overlay entry; `Some(None)` — pending tombstone;
    /// `Some(Some(page))` — pending write
    fn lookup(&self, key: &str) -> Option<Option<Page>> {
        let entries = self.entries.read();
        entries.get(key).map(|entry| match &entry.pending {
            Pending::Write(page) => Some(page.copy()),
            Pending::Tombstone => None,
        })
    }

    /// Clear the entry for `key` if `seq` is still its current
    /// sequence number. Returns whether an entry was removed.
    fn remove_if_current(&self, key: &str, seq: u64) -> bool {
        let mut entries = self.entries.write();
        match entries.get(key) {
            Some(entry) if entry.seq == seq => {
                entries.remove(key);
                true
            }
            _ => false,
        }
    }

    /// Split pending keys into (visible writes, hidden removes)
    fn partition(&self) -> (HashSet<String>, HashSet<String>) {
        let entries = self.entries.read();
        let mut writes = HashSet::new();
        let mut removes = HashSet::new();
        for (key, entry) in entries.iter() {
            match entry.pending {
                Pending::Write(_) => writes.insert(key.clone()),
                Pending::Tombstone => removes.insert(key.clone()),
            };
        }
        (writes, removes)
    }
}

/// One unit of work for the write-behind worker
enum Task {
    Write { key: String, data: Vec<u8>, seq: u64 },
    Tombstone { key: String, seq: u64 },
    /// Shutdown sentinel; enqueued by `close` after all prior writes
    Stop,
}

/// Write-behind machinery, present only in async mode
struct WriteBehind {
    sender: Sender<Task>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

/// File-backed page store
///
/// One regular file per key under `config.dir`, which the store owns
/// exclusively for its lifetime. All operations take `&self` and are
/// safe to call from arbitrary threads.
pub struct FileStore {
    config: StoreConfig,
    dir: PathBuf,
    /// Scheme for future writes; records self-describe, so changing it
    /// never invalidates what is already on disk
    compression: Arc<Mutex<Compression>>,
    overlay: Arc<Overlay>,
    writer: Option<WriteBehind>,
    write_count: AtomicU64,
    read_count: AtomicU64,
    next_seq: AtomicU64,
    closed: AtomicBool,
}

impl FileStore {
    /// Open or create a store with the given config
    ///
    /// Creates the directory if absent and, in write-behind mode,
    /// starts the background worker.
    pub fn open(config: StoreConfig) -> Result<Self> {
        fs::create_dir_all(&config.dir)?;

        let dir = config.dir.clone();
        let compression = Arc::new(Mutex::new(config.write_compression));
        let overlay = Arc::new(Overlay::default());

        let writer = if config.async_write {
            let capacity = config.queue_capacity.max(1);
            let (sender, receiver) = bounded(capacity);
            let handle = thread::Builder::new()
                .name("foliostore-writer".to_string())
                .spawn({
                    let dir = dir.clone();
                    let overlay = Arc::clone(&overlay);
                    let compression = Arc::clone(&compression);
                    move || run_worker(receiver, dir, overlay, compression)
                })?;
            Some(WriteBehind {
                sender,
                worker: Mutex::new(Some(handle)),
            })
        } else {
            None
        };

        Ok(Self {
            config,
            dir,
            compression,
            overlay,
            writer,
            write_count: AtomicU64::new(0),
            read_count: AtomicU64::new(0),
            next_seq: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        })
    }

    /// Open with a directory path (convenience method)
    ///
    /// Uses default config (synchronous mode) with the specified directory.
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(StoreConfig::builder().dir(path).build())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(FolioError::Closed);
        }
        Ok(())
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Read a full record from disk; `None` for absent or tombstone
    fn read_record(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.read_count.fetch_add(1, Ordering::SeqCst);
        let record = match fs::read(self.file_path(key)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if record.is_empty() {
            // tombstone: removed, not corrupt
            return Ok(None);
        }
        Ok(Some(record))
    }
}

impl Store for FileStore {
    fn get_if_exists(&self, key: &str) -> Result<Option<Page>> {
        match self.overlay.lookup(key) {
            Some(Some(page)) => return Ok(Some(page)),
            Some(None) => return Ok(None),
            None => {}
        }
        if !is_valid_key(key) {
            return Ok(None);
        }
        match self.read_record(key)? {
            Some(record) => {
                let data = Compression::expand(&record)?;
                Ok(Some(Page::from_bytes(&data)?))
            }
            None => Ok(None),
        }
    }

    fn put(&self, key: &str, page: &Page) -> Result<()> {
        self.ensure_open()?;
        validate_key(key)?;
        self.write_count.fetch_add(1, Ordering::SeqCst);
        match &self.writer {
            Some(writer) => {
                let data = page.to_bytes()?;
                let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
                self.overlay.record(key, Pending::Write(page.copy()), seq);
                let task = Task::Write {
                    key: key.to_string(),
                    data,
                    seq,
                };
                // blocks while the queue is full (backpressure)
                if writer.sender.send(task).is_err() {
                    self.overlay.remove_if_current(key, seq);
                    return Err(FolioError::Closed);
                }
                Ok(())
            }
            None => {
                let record = self.compression.lock().compress(&page.to_bytes()?)?;
                write_record(&self.dir, key, &record)
            }
        }
    }

    fn supports_byte_operations(&self) -> bool {
        true
    }

    fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.overlay.lookup(key) {
            // reproduce the record the pending flush will produce
            Some(Some(page)) => {
                let record = self.compression.lock().compress(&page.to_bytes()?)?;
                return Ok(Some(record));
            }
            Some(None) => return Ok(None),
            None => {}
        }
        if !is_valid_key(key) {
            return Ok(None);
        }
        self.read_record(key)
    }

    fn put_bytes(&self, key: &str, data: &[u8]) -> Result<()> {
        self.ensure_open()?;
        validate_key(key)?;
        self.write_count.fetch_add(1, Ordering::SeqCst);
        // byte-level writes are inline in both modes; the caller already
        // holds an encoded record
        write_record(&self.dir, key, data)
    }

    fn remove(&self, keys: &HashSet<String>) -> Result<()> {
        self.ensure_open()?;
        for key in keys {
            if !is_valid_key(key) {
                // such a key cannot exist; removing it is a no-op
                continue;
            }
            self.write_count.fetch_add(1, Ordering::SeqCst);
            match &self.writer {
                Some(writer) => {
                    let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
                    self.overlay.record(key, Pending::Tombstone, seq);
                    let task = Task::Tombstone {
                        key: key.clone(),
                        seq,
                    };
                    if writer.sender.send(task).is_err() {
                        self.overlay.remove_if_current(key, seq);
                        return Err(FolioError::Closed);
                    }
                }
                None => match fs::remove_file(self.file_path(key)) {
                    Ok(()) => {}
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e.into()),
                },
            }
        }
        Ok(())
    }

    fn remove_all(&self) -> Result<()> {
        let keys = self.key_set()?;
        self.remove(&keys)
    }

    fn key_set(&self) -> Result<HashSet<String>> {
        let mut keys = HashSet::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            // zero-length files are tombstones, not keys
            if metadata.is_file() && metadata.len() > 0 {
                if let Ok(name) = entry.file_name().into_string() {
                    keys.insert(name);
                }
            }
        }
        let (pending_writes, pending_removes) = self.overlay.partition();
        keys.extend(pending_writes);
        for key in &pending_removes {
            keys.remove(key);
        }
        Ok(keys)
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

    fn set_write_compression(&self, compression: Compression) {
        *self.compression.lock() = compression;
    }

    fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Two-phase drain: enqueue the stop sentinel behind every pending
    /// write, then join the worker. Blocks until all pending tasks up
    /// to the sentinel are flushed.
    fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        if let Some(writer) = &self.writer {
            if writer.sender.send(Task::Stop).is_err() {
                return Err(FolioError::Closed);
            }
            if let Some(handle) = writer.worker.lock().take() {
                if handle.join().is_err() {
                    tracing::error!("write-behind worker panicked before drain completed");
                    return Err(FolioError::Closed);
                }
            }
        }
        Ok(())
    }
}

impl Drop for FileStore {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::error!(error = %e, "error closing store on drop");
        }
    }
}

impl std::fmt::Display for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "file({})", self.dir.display())
    }
}

/// Worker loop: drain tasks strictly in submission order until Stop
fn run_worker(
    receiver: Receiver<Task>,
    dir: PathBuf,
    overlay: Arc<Overlay>,
    compression: Arc<Mutex<Compression>>,
) {
    for task in receiver.iter() {
        match task {
            Task::Stop => break,
            Task::Write { key, data, seq } => {
                let scheme = *compression.lock();
                let result = scheme
                    .compress(&data)
                    .and_then(|record| write_record(&dir, &key, &record));
                match result {
                    Ok(()) => {
                        overlay.remove_if_current(&key, seq);
                    }
                    Err(e) => {
                        tracing::error!(key = %key, error = %e, "background flush failed; value stays pending");
                    }
                }
            }
            Task::Tombstone { key, seq } => match write_record(&dir, &key, &[]) {
                Ok(()) => {
                    overlay.remove_if_current(&key, seq);
                }
                Err(e) => {
                    tracing::error!(key = %key, error = %e, "background tombstone write failed");
                }
            },
        }
    }
}

fn write_record(dir: &Path, key: &str, record: &[u8]) -> Result<()> {
    fs::write(dir.join(key), record)?;
    Ok(())
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key != "."
        && key != ".."
        && !key.contains('/')
        && !key.contains('\\')
        && !key.contains('\0')
}

fn validate_key(key: &str) -> Result<()> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(FolioError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(byte: u8) -> Page {
        Page::new(vec![byte; 4])
    }

    #[test]
    fn stale_flush_does_not_clear_newer_overlay_entry() {
        let overlay = Overlay::default();
        overlay.record("k", Pending::Write(page(1)), 1);
        overlay.record("k", Pending::Write(page(2)), 2);

        // the flush for seq 1 arrives after the re-submission
        assert!(!overlay.remove_if_current("k", 1));
        let pending = overlay.lookup("k").expect("entry must survive");
        assert_eq!(pending.expect("not a tombstone"), page(2));

        // the flush for the current occupant clears it
        assert!(overlay.remove_if_current("k", 2));
        assert!(overlay.lookup("k").is_none());
    }

    #[test]
    fn tombstone_entry_reads_as_absence() {
        let overlay = Overlay::default();
        overlay.record("k", Pending::Tombstone, 7);
        assert_eq!(overlay.lookup("k"), Some(None));

        let (writes, removes) = overlay.partition();
        assert!(writes.is_empty());
        assert!(removes.contains("k"));
    }

    #[test]
    fn key_validation_rejects_path_like_names() {
        for bad in ["", ".", "..", "a/b", "a\\b", "nul\0byte"] {
            assert!(!is_valid_key(bad), "{:?} must be rejected", bad);
        }
        for good in ["page", "0198c2f3a1b2", "a..b", "UPPER_case-1.bin"] {
            assert!(is_valid_key(good), "{:?} must be accepted", good);
        }
    }
}
