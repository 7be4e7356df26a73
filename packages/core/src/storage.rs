//! The key-path operation orchestrator over a synchronous medium.

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{Map, Value};
use stash_medium::{Medium, MediumError};

use crate::codec::{Codec, JsonCodec};
use crate::key_path::KeyPath;
use crate::traverse::{self, DeleteOutcome};
use crate::Error;

/// A hierarchical view over a flat string-keyed medium.
///
/// Every operation is a single-shot fetch / decode / traverse / encode /
/// store pipeline; no state is retained between calls. The medium handle
/// is shared, so namespace views created with [`Storage::create_namespace`]
/// all read and write the same flat store.
///
/// # Known limitation
///
/// The read-modify-write inside `set` and `remove` spans two separate
/// medium calls and holds no lock in between. Two concurrent mutators of
/// the same top-level key can lose an update. Callers needing atomicity
/// must serialize externally.
///
/// # Example
///
/// ```rust
/// use stash_core::Storage;
/// # use std::collections::BTreeMap;
/// # use stash_core::{Medium, MediumError};
/// # struct MapMedium(BTreeMap<String, String>);
/// # impl Medium for MapMedium {
/// #     fn get(&mut self, key: &str) -> Result<Option<String>, MediumError> {
/// #         Ok(self.0.get(key).cloned())
/// #     }
/// #     fn all(&mut self) -> Result<BTreeMap<String, String>, MediumError> {
/// #         Ok(self.0.clone())
/// #     }
/// #     fn set(&mut self, key: &str, value: String) -> Result<(), MediumError> {
/// #         self.0.insert(key.to_string(), value);
/// #         Ok(())
/// #     }
/// #     fn remove(&mut self, key: &str) -> Result<(), MediumError> {
/// #         self.0.remove(key);
/// #         Ok(())
/// #     }
/// #     fn clear(&mut self) -> Result<(), MediumError> {
/// #         self.0.clear();
/// #         Ok(())
/// #     }
/// # }
///
/// let storage = Storage::new(MapMedium(BTreeMap::new()));
/// storage.set("person.name.first", "John").unwrap();
/// assert_eq!(
///     storage.get("person.name.first").unwrap(),
///     Some("John".into())
/// );
/// ```
pub struct Storage<M> {
    medium: Arc<Mutex<M>>,
    codec: Arc<dyn Codec>,
    namespace: KeyPath,
}

impl<M> Clone for Storage<M> {
    fn clone(&self) -> Self {
        Self {
            medium: self.medium.clone(),
            codec: self.codec.clone(),
            namespace: self.namespace.clone(),
        }
    }
}

impl<M: Medium> Storage<M> {
    /// Create a storage view over `medium` with no namespace.
    pub fn new(medium: M) -> Self {
        Self::with_namespace(medium, KeyPath::root())
    }

    /// Create a storage view whose every path is prefixed by `namespace`.
    ///
    /// A string-form namespace splits on dots, like any other path.
    pub fn with_namespace(medium: M, namespace: impl Into<KeyPath>) -> Self {
        Storage {
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
    /// deeper. No data is copied or moved.
    pub fn create_namespace(&self, segment: impl Into<String>) -> Storage<M> {
        Storage {
            medium: self.medium.clone(),
            codec: self.codec.clone(),
            namespace: self.namespace.child(segment),
        }
    }

    /// Retrieve the value at `path`, or `None` if nothing is stored there.
    pub fn get(&self, path: impl Into<KeyPath>) -> Result<Option<Value>, Error> {
        self.get_abs(&self.namespace.join(&path.into()))
    }

    /// Retrieve every key/value pair visible to this view as a fresh map.
    ///
    /// On a namespaced view this is the namespace subtree: entries of the
    /// mapping stored under the namespace path, or an empty map when that
    /// subtree is absent or not a mapping.
    ///
    /// Keys whose stored blob fails to decode are skipped with a logged
    /// warning; a direct `get` of the same key reports the decode error.
    pub fn all(&self) -> Result<Map<String, Value>, Error> {
        if !self.namespace.is_empty() {
            return Ok(match self.get_abs(&self.namespace)? {
                Some(Value::Object(map)) => map,
                _ => Map::new(),
            });
        }

        let blobs = self.lock()?.all()?;
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
    pub fn set(&self, path: impl Into<KeyPath>, value: impl Into<Value>) -> Result<(), Error> {
        self.set_abs(&self.namespace.join(&path.into()), value.into())
    }

    /// Remove the entry at `path`. Removing a path that does not exist is
    /// a no-op.
    pub fn remove(&self, path: impl Into<KeyPath>) -> Result<(), Error> {
        self.remove_abs(&self.namespace.join(&path.into()))
    }

    /// Clear everything visible to this view.
    ///
    /// Without a namespace this clears the whole medium. With one, only
    /// the namespaced subtree is wiped; siblings in the same medium are
    /// untouched.
    pub fn clear(&self) -> Result<(), Error> {
        if self.namespace.is_empty() {
            self.lock()?.clear()?;
            return Ok(());
        }
        let namespace = self.namespace.clone();
        self.set_abs(&namespace, Value::Object(Map::new()))
    }

    fn lock(&self) -> Result<MutexGuard<'_, M>, Error> {
        self.medium
            .lock()
            .map_err(|_| Error::Medium(MediumError::LockPoisoned))
    }

    fn decode(&self, key: &str, raw: &str) -> Result<Value, Error> {
        self.codec.decode(raw).map_err(|e| Error::Decode {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    fn get_abs(&self, path: &KeyPath) -> Result<Option<Value>, Error> {
        let Some((first, rest)) = path.split_first() else {
            return Ok(None);
        };
        let raw = self.lock()?.get(first)?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let root = self.decode(first, &raw)?;
        Ok(traverse::read_at(Some(&root), rest))
    }

    fn set_abs(&self, path: &KeyPath, value: Value) -> Result<(), Error> {
        let Some((first, rest)) = path.split_first() else {
            return Err(Error::InvalidPath {
                message: "set requires at least one path segment".to_string(),
            });
        };

        // Two separate medium calls; see the type-level note on races.
        let raw = self.lock()?.get(first)?;
        let current = match raw {
            Some(raw) => Some(self.decode(first, &raw)?),
            None => None,
        };

        let root = traverse::write_at(current, rest, value);
        let encoded = self.codec.encode(&root).map_err(|e| Error::Encode {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        self.lock()?.set(first, encoded)?;
        Ok(())
    }

    fn remove_abs(&self, path: &KeyPath) -> Result<(), Error> {
        let Some((first, rest)) = path.split_first() else {
            return Err(Error::InvalidPath {
                message: "remove requires at least one path segment".to_string(),
            });
        };

        let raw = self.lock()?.get(first)?;
        let current = match raw {
            Some(raw) => Some(self.decode(first, &raw)?),
            None => None,
        };

        match traverse::delete_at(current, rest) {
            DeleteOutcome::RemoveKey => {
                self.lock()?.remove(first)?;
                Ok(())
            }
            DeleteOutcome::Store(root) => {
                let encoded = self.codec.encode(&root).map_err(|e| Error::Encode {
                    path: path.to_string(),
                    message: e.to_string(),
                })?;
                self.lock()?.set(first, encoded)?;
                Ok(())
            }
            DeleteOutcome::Untouched => Ok(()),
        }
    }
}
