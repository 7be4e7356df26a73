//! The core trait of the medium layer.

use std::collections::BTreeMap;

use crate::MediumError;

/// A flat string-keyed store of string blobs.
///
/// This is the capability contract every storage backend implements. Keys
/// are opaque strings (the layers above reserve the first path segment for
/// them), and values are opaque encoded blobs. A medium performs no
/// decoding and no path interpretation.
///
/// # Contract
///
/// * `get` returns `Ok(None)` for an absent key - absence is not an error.
/// * `all` returns a fresh copy; mutating the returned map must not affect
///   the stored data.
/// * `set` overwrites unconditionally.
/// * `remove` of an absent key is a no-op.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn Medium>`.
pub trait Medium: Send + Sync {
    /// Retrieve the blob stored at `key`, if any.
    fn get(&mut self, key: &str) -> Result<Option<String>, MediumError>;

    /// Retrieve every key/blob pair as a fresh map.
    fn all(&mut self) -> Result<BTreeMap<String, String>, MediumError>;

    /// Store `value` at `key`, overwriting any existing blob.
    fn set(&mut self, key: &str, value: String) -> Result<(), MediumError>;

    /// Remove `key` from the store.
    fn remove(&mut self, key: &str) -> Result<(), MediumError>;

    /// Remove every key/blob pair from the store.
    fn clear(&mut self) -> Result<(), MediumError>;
}

impl std::fmt::Debug for dyn Medium {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Medium")
    }
}

// Blanket implementations for references and boxes

impl<T: Medium + ?Sized> Medium for &mut T {
    fn get(&mut self, key: &str) -> Result<Option<String>, MediumError> {
        (*self).get(key)
    }

    fn all(&mut self) -> Result<BTreeMap<String, String>, MediumError> {
        (*self).all()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), MediumError> {
        (*self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), MediumError> {
        (*self).remove(key)
    }

    fn clear(&mut self) -> Result<(), MediumError> {
        (*self).clear()
    }
}

impl<T: Medium + ?Sized> Medium for Box<T> {
    fn get(&mut self, key: &str) -> Result<Option<String>, MediumError> {
        self.as_mut().get(key)
    }

    fn all(&mut self) -> Result<BTreeMap<String, String>, MediumError> {
        self.as_mut().all()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), MediumError> {
        self.as_mut().set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), MediumError> {
        self.as_mut().remove(key)
    }

    fn clear(&mut self) -> Result<(), MediumError> {
        self.as_mut().clear()
    }
}
