//! Core semantics of stash: key paths, codecs, and the storage
//! orchestrators that project a hierarchical tree onto a flat
//! string-keyed medium.
//!
//! A path's first segment selects the medium key; everything deeper lives
//! inside the JSON blob stored under that key. `Storage` runs the whole
//! fetch / decode / traverse / encode / store pipeline per operation and
//! keeps no state of its own, so any number of namespaced views can share
//! one medium.
//!
//! The async twin, `AsyncStorage`, is gated behind the `async` feature.

#[cfg(feature = "async")]
mod async_storage;
mod codec;
mod error;
mod key_path;
mod storage;
pub mod traverse;

pub use codec::{Codec, CodecError, JsonCodec};
pub use error::Error;
pub use key_path::KeyPath;
pub use storage::Storage;

// Value trees are plain serde_json values.
pub use serde_json::{Map, Value};

// Re-export the medium layer so most users depend on this crate alone.
pub use stash_medium::{Medium, MediumError};

#[cfg(feature = "async")]
pub use async_storage::AsyncStorage;
#[cfg(feature = "async")]
pub use stash_medium::{AsyncMedium, SyncToAsyncMedium};
