//! The asynchronous twin of [`Storage`](crate::Storage).
//!
//! Same pipeline, same semantics, but every medium call is awaited. This
//! is a separate type rather than a runtime capability probe: whether a
//! medium is sync or async is decided at the type level, and each storage
//! pairs with exactly one kind.

use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::Mutex;

use stash_medium::AsyncMedium;

use crate::codec::{Codec, JsonCodec};
use crate::key_path::KeyPath;
use crate::traverse::{self, DeleteOutcome};
use crate::Error;

/// A hierarchical view over a flat string-keyed asynchronous medium.
///
/// Mirrors [`Storage`](crate::Storage) operation for operation; see its
/// documentation for path syntax, namespace semantics, and the
/// non-atomicity caveat on `set` and `remove`. The medium lock is held
/// only for the duration of each individual medium call, never across a
/// decode or an await point between calls.
pub struct AsyncStorage<M> {
    medium: Arc<Mutex<M>>,
    codec: Arc<dyn Codec>,
    namespace: KeyPath,
}

impl<M> Clone for AsyncStorage<M> {
    fn clone(&self) -> Self {
        Self {
            medium: self.medium.clone(),
            codec: self.codec.clone(),
            namespace: self.namespace.clone(),
        }
    }
}

impl<M: AsyncMedium> AsyncStorage<M> {
    /// Create a storage view over `medium` with no namespace.
    pub fn new(medium: M) -> Self {
        Self::with_namespace(medium, KeyPath::root())
    }

    /// Create a storage view whose every path is prefixed by `namespace`.
    pub fn with_namespace(medium: M, namespace: impl Into<KeyPath>) -> Self {
        AsyncStorage {
            medium: Arc::new(Mutex::new(medium)),
            codec: Arc::new(JsonCodec),
            namespace: namespace.into(),
        }
    }

    /// Replace the default [`JsonCodec`] with a custom codec.
    #[must_use]
    pub fn with_codec(mut self, codec: impl Codec + 'static) -> Self {
        self.codec = Arc::new(codec);
        self
    }

    /// The namespace prefix of this view.
    pub fn namespace(&self) -> &KeyPath {
        &self.namespace
    }

    /// Return a view sharing this medium, namespaced one literal segment
    /// deeper.
    pub fn create_namespace(&self, segment: impl Into<String>) -> AsyncStorage<M> {
        AsyncStorage {
            medium: self.medium.clone(),
            codec: self.codec.clone(),
            namespace: self.namespace.child(segment),
        }
    }

    /// Retrieve the value at `path`, or `None` if nothing is stored there.
    pub async fn get(&self, path: impl Into<KeyPath>) -> Result<Option<Value>, Error> {
        self.get_abs(&self.namespace.join(&path.into())).await
    }

    /// Retrieve every key/value pair visible to this view as a fresh map.
    ///
    /// Undecodable blobs are skipped with a logged warning, as in the
    /// synchronous variant.
    pub async fn all(&self) -> Result<Map<String, Value>, Error> {
        if !self.namespace.is_empty() {
            return Ok(match self.get_abs(&self.namespace).await? {
                Some(Value::Object(map)) => map,
                _ => Map::new(),
            });
        }

        let blobs = self.medium.lock().await.all().await?;
        let mut copy = Map::new();
        for (key, raw) in blobs {
            match self.codec.decode(&raw) {
                Ok(value) => {
                    copy.insert(key, value);
                }
                Err(e) => {
                    log::warn!("skipping key '{}': stored blob failed to decode: {}", key, e);
                }
            }
        }
        Ok(copy)
    }

    /// Store `value` at `path`, merging into the existing tree under the
    /// path's first segment.
    pub async fn set(
        &self,
        path: impl Into<KeyPath>,
        value: impl Into<Value>,
    ) -> Result<(), Error> {
        self.set_abs(&self.namespace.join(&path.into()), value.into())
            .await
    }

    /// Remove the entry at `path`. Removing a path that does not exist is
    /// a no-op.
    pub async fn remove(&self, path: impl Into<KeyPath>) -> Result<(), Error> {
        self.remove_abs(&self.namespace.join(&path.into())).await
    }

    /// Clear everything visible to this view.
    pub async fn clear(&self) -> Result<(), Error> {
        if self.namespace.is_empty() {
            self.medium.lock().await.clear().await?;
            return Ok(());
        }
        let namespace = self.namespace.clone();
        self.set_abs(&namespace, Value::Object(Map::new())).await
    }

    fn decode(&self, key: &str, raw: &str) -> Result<Value, Error> {
        self.codec.decode(raw).map_err(|e| Error::Decode {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    async fn get_abs(&self, path: &KeyPath) -> Result<Option<Value>, Error> {
        let Some((first, rest)) = path.split_first() else {
            return Ok(None);
        };
        let raw = self.medium.lock().await.get(first).await?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let root = self.decode(first, &raw)?;
        Ok(traverse::read_at(Some(&root), rest))
    }

    async fn set_abs(&self, path: &KeyPath, value: Value) -> Result<(), Error> {
        let Some((first, rest)) = path.split_first() else {
            return Err(Error::InvalidPath {
                message: "set requires at least one path segment".to_string(),
            });
        };

        let raw = self.medium.lock().await.get(first).await?;
        let current = match raw {
            Some(raw) => Some(self.decode(first, &raw)?),
            None => None,
        };

        let root = traverse::write_at(current, rest, value);
        let encoded = self.codec.encode(&root).map_err(|e| Error::Encode {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        self.medium.lock().await.set(first, encoded).await?;
        Ok(())
    }

    async fn remove_abs(&self, path: &KeyPath) -> Result<(), Error> {
        let Some((first, rest)) = path.split_first() else {
            return Err(Error::InvalidPath {
                message: "remove requires at least one path segment".to_string(),
            });
        };

        let raw = self.medium.lock().await.get(first).await?;
        let current = match raw {
            Some(raw) => Some(self.decode(first, &raw)?),
            None => None,
        };

        match traverse::delete_at(current, rest) {
            DeleteOutcome::RemoveKey => {
                self.medium.lock().await.remove(first).await?;
                Ok(())
            }
            DeleteOutcome::Store(root) => {
                let encoded = self.codec.encode(&root).map_err(|e| Error::Encode {
                    path: path.to_string(),
                    message: e.to_string(),
                })?;
                self.medium.lock().await.set(first, encoded).await?;
                Ok(())
            }
            DeleteOutcome::Untouched => Ok(()),
        }
    }
}
