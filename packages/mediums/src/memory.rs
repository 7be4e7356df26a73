//! In-memory mediums.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use stash_medium::{Medium, MediumError};

/// A private in-memory medium. Each instance owns its own map; dropping
/// the medium drops the data.
///
/// This is also what a caller-supplied map of raw blobs resolves to.
pub struct MemoryMedium {
    data: BTreeMap<String, String>,
}

impl MemoryMedium {
    /// Create an empty medium.
    pub fn new() -> Self {
        MemoryMedium {
            data: BTreeMap::new(),
        }
    }

    /// Create a medium pre-seeded with raw encoded blobs.
    pub fn from_map(data: BTreeMap<String, String>) -> Self {
        MemoryMedium { data }
    }
}

impl Default for MemoryMedium {
    fn default() -> Self {
        Self::new()
    }
}

impl Medium for MemoryMedium {
    fn get(&mut self, key: &str) -> Result<Option<String>, MediumError> {
        Ok(self.data.get(key).cloned())
    }

    fn all(&mut self) -> Result<BTreeMap<String, String>, MediumError> {
        Ok(self.data.clone())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), MediumError> {
        self.data.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), MediumError> {
        self.data.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), MediumError> {
        self.data.clear();
        Ok(())
    }
}

/// A cloneable handle to shared in-memory data.
///
/// All clones read and write the same underlying map, so two storages
/// resolved to the same shared medium see each other's writes. This backs
/// the process-wide `"page"` and `"session"` predefined mediums.
#[derive(Clone)]
pub struct SharedMemoryMedium {
    data: Arc<Mutex<BTreeMap<String, String>>>,
}

impl SharedMemoryMedium {
    /// Create a handle to a fresh shared map.
    pub fn new() -> Self {
        SharedMemoryMedium {
            data: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, MediumError> {
        self.data.lock().map_err(|_| MediumError::LockPoisoned)
    }
}

impl Default for SharedMemoryMedium {
    fn default() -> Self {
        Self::new()
    }
}

impl Medium for SharedMemoryMedium {
    fn get(&mut self, key: &str) -> Result<Option<String>, MediumError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn all(&mut self) -> Result<BTreeMap<String, String>, MediumError> {
        Ok(self.lock()?.clone())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), MediumError> {
        self.lock()?.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), MediumError> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), MediumError> {
        self.lock()?.clear();
        Ok(())
    }
}
