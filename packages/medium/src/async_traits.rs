//! Async trait variant of the medium layer.
//!
//! `AsyncMedium` is the deferred-result twin of `Medium`, for backends whose
//! primitives return futures (network KV stores, async file I/O, browser
//! bridges). Enable the `async` feature to use it:
//!
//! ```toml
//! [dependencies]
//! stash-medium = { version = "0.1", features = ["async"] }
//! ```

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::{Medium, MediumError};

/// Async version of [`Medium`].
///
/// Same contract as the sync trait: `get` returns `Ok(None)` for absent
/// keys, `all` returns a fresh copy, `set` overwrites, `remove` of an
/// absent key is a no-op.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn AsyncMedium>`.
#[async_trait]
pub trait AsyncMedium: Send + Sync {
    /// Retrieve the blob stored at `key`, if any.
    async fn get(&mut self, key: &str) -> Result<Option<String>, MediumError>;

    /// Retrieve every key/blob pair as a fresh map.
    async fn all(&mut self) -> Result<BTreeMap<String, String>, MediumError>;

    /// Store `value` at `key`, overwriting any existing blob.
    async fn set(&mut self, key: &str, value: String) -> Result<(), MediumError>;

    /// Remove `key` from the store.
    async fn remove(&mut self, key: &str) -> Result<(), MediumError>;

    /// Remove every key/blob pair from the store.
    async fn clear(&mut self) -> Result<(), MediumError>;
}

// Blanket implementations for references and boxes

#[async_trait]
impl<T: AsyncMedium + ?Sized> AsyncMedium for &mut T {
    async fn get(&mut self, key: &str) -> Result<Option<String>, MediumError> {
        (**self).get(key).await
    }

    async fn all(&mut self) -> Result<BTreeMap<String, String>, MediumError> {
        (**self).all().await
    }

    async fn set(&mut self, key: &str, value: String) -> Result<(), MediumError> {
        (**self).set(key, value).await
    }

    async fn remove(&mut self, key: &str) -> Result<(), MediumError> {
        (**self).remove(key).await
    }

    async fn clear(&mut self) -> Result<(), MediumError> {
        (**self).clear().await
    }
}

#[async_trait]
impl<T: AsyncMedium + ?Sized> AsyncMedium for Box<T> {
    async fn get(&mut self, key: &str) -> Result<Option<String>, MediumError> {
        self.as_mut().get(key).await
    }

    async fn all(&mut self) -> Result<BTreeMap<String, String>, MediumError> {
        self.as_mut().all().await
    }

    async fn set(&mut self, key: &str, value: String) -> Result<(), MediumError> {
        self.as_mut().set(key, value).await
    }

    async fn remove(&mut self, key: &str) -> Result<(), MediumError> {
        self.as_mut().remove(key).await
    }

    async fn clear(&mut self) -> Result<(), MediumError> {
        self.as_mut().clear().await
    }
}

/// Adapter to use a sync medium where an [`AsyncMedium`] is expected.
///
/// Wraps the medium in a mutex for thread-safe access. Every call completes
/// immediately; this exists so sync backends can be handed to async
/// orchestration without a second code path.
pub struct SyncToAsyncMedium<T> {
    inner: std::sync::Arc<std::sync::Mutex<T>>,
}

impl<T> SyncToAsyncMedium<T> {
    /// Create a new adapter wrapping a sync medium.
    pub fn new(inner: T) -> Self {
        Self {
            inner: std::sync::Arc::new(std::sync::Mutex::new(inner)),
        }
    }

    /// Get a reference to the inner mutex.
    pub fn inner(&self) -> &std::sync::Mutex<T> {
        &self.inner
    }
}

impl<T> Clone for SyncToAsyncMedium<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[async_trait]
impl<T: Medium + Send + 'static> AsyncMedium for SyncToAsyncMedium<T> {
    async fn get(&mut self, key: &str) -> Result<Option<String>, MediumError> {
        let mut guard = self.inner.lock().map_err(|_| MediumError::LockPoisoned)?;
        guard.get(key)
    }

    async fn all(&mut self) -> Result<BTreeMap<String, String>, MediumError> {
        let mut guard = self.inner.lock().map_err(|_| MediumError::LockPoisoned)?;
        guard.all()
    }

    async fn set(&mut self, key: &str, value: String) -> Result<(), MediumError> {
        let mut guard = self.inner.lock().map_err(|_| MediumError::LockPoisoned)?;
        guard.set(key, value)
    }

    async fn remove(&mut self, key: &str) -> Result<(), MediumError> {
        let mut guard = self.inner.lock().map_err(|_| MediumError::LockPoisoned)?;
        guard.remove(key)
    }

    async fn clear(&mut self) -> Result<(), MediumError> {
        let mut guard = self.inner.lock().map_err(|_| MediumError::LockPoisoned)?;
        guard.clear()
    }
}
