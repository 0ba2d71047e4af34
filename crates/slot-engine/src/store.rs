//! Availability record store.
//!
//! The store is a collaborator of the engine, not part of it: selection only
//! ever sees the record list it returns. Two backends are provided, an
//! in-memory one for tests and embedding, and a JSON file on disk.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};

use tempfile::NamedTempFile;

use crate::error::{Result, SlotError};
use crate::record::AvailabilityRecord;

/// Append-only intake plus coarse admin operations.
///
/// Each mutating call is atomic: concurrent inserts never lose a record.
pub trait RecordStore {
    /// Every record, in insertion order.
    fn list_all(&self) -> Result<Vec<AvailabilityRecord>>;

    fn insert(&self, record: AvailabilityRecord) -> Result<()>;

    /// Remove every record whose name is in `names`. Returns how many were removed.
    fn delete(&self, names: &[String]) -> Result<usize>;

    fn clear(&self) -> Result<()>;
}

/// Read all records, treating a failing store as empty.
///
/// Store faults are logged, not propagated: to the engine a store that cannot
/// be read simply has no data for this call.
pub fn load_records(store: &dyn RecordStore) -> Vec<AvailabilityRecord> {
    match store.list_all() {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!(error = %err, "record store unavailable, treating as empty");
            Vec::new()
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<AvailabilityRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<AvailabilityRecord>>> {
        self.records
            .lock()
            .map_err(|_| SlotError::Store("memory store lock poisoned".to_string()))
    }
}

impl From<Vec<AvailabilityRecord>> for MemoryStore {
    fn from(records: Vec<AvailabilityRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl RecordStore for MemoryStore {
    fn list_all(&self) -> Result<Vec<AvailabilityRecord>> {
        Ok(self.lock()?.clone())
    }

    fn insert(&self, record: AvailabilityRecord) -> Result<()> {
        self.lock()?.push(record);
        Ok(())
    }

    fn delete(&self, names: &[String]) -> Result<usize> {
        let mut records = self.lock()?;
        let before = records.len();
        records.retain(|r| !names.contains(&r.name));
        Ok(before - records.len())
    }

    fn clear(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }
}

/// How long a writer waits for another writer's lock before giving up.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(10);

const LOCK_RETRY: Duration = Duration::from_millis(5);

/// Records kept as a JSON array in a single file.
///
/// Every read-modify-write holds `<file>.lock`, created exclusively, so writers
/// in different processes (or different store values in one process) are
/// serialised. New contents go to a uniquely named temp file in the same
/// directory that is then persisted over the original; readers see either the
/// old or the new array, never a partial one. A missing file is an empty store.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock_timeout: Duration,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lock_path(&self) -> PathBuf {
        let mut lock = self.path.clone().into_os_string();
        lock.push(".lock");
        PathBuf::from(lock)
    }

    fn dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }

    fn lock(&self) -> Result<LockFile> {
        fs::create_dir_all(self.dir())?;
        LockFile::acquire(self.lock_path(), self.lock_timeout)
    }

    fn read(&self) -> Result<Vec<AvailabilityRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Replace the file. The temp file is removed if anything fails before
    /// it is persisted.
    fn write(&self, records: &[AvailabilityRecord]) -> Result<()> {
        let mut tmp = NamedTempFile::new_in(self.dir())?;
        serde_json::to_writer_pretty(&mut tmp, records)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }

    /// Run `f` on the current records while holding the lock, writing the
    /// result back when `f` reports a change.
    fn update<T>(&self, f: impl FnOnce(&mut Vec<AvailabilityRecord>) -> (T, bool)) -> Result<T> {
        let _lock = self.lock()?;
        let mut records = self.read()?;
        let (out, changed) = f(&mut records);
        if changed {
            self.write(&records)?;
        }
        Ok(out)
    }
}

impl RecordStore for JsonFileStore {
    fn list_all(&self) -> Result<Vec<AvailabilityRecord>> {
        self.read()
    }

    fn insert(&self, record: AvailabilityRecord) -> Result<()> {
        tracing::debug!(name = %record.name, path = %self.path.display(), "inserting record");
        self.update(|records| {
            records.push(record);
            ((), true)
        })
    }

    fn delete(&self, names: &[String]) -> Result<usize> {
        self.update(|records| {
            let before = records.len();
            records.retain(|r| !names.contains(&r.name));
            let removed = before - records.len();
            (removed, removed > 0)
        })
    }

    fn clear(&self) -> Result<()> {
        self.update(|records| {
            records.clear();
            ((), true)
        })
    }
}

/// Exclusive `.lock` file, removed on drop.
#[derive(Debug)]
struct LockFile {
    path: PathBuf,
}

impl LockFile {
    fn acquire(path: PathBuf, timeout: Duration) -> Result<Self> {
        let deadline = Instant::now() + timeout;
        loop {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => return Ok(Self { path }),
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                    if Instant::now() >= deadline {
                        return Err(SlotError::Store(format!(
                            "timed out waiting for {}; remove it if no writer is running",
                            path.display()
                        )));
                    }
                    thread::sleep(LOCK_RETRY);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            tracing::warn!(error = %err, path = %self.path.display(), "failed to release store lock");
        }
    }
}
