//! Stash: hierarchical dot-path storage over flat string-keyed mediums.
//!
//! Values live in a logical tree addressed by dotted paths; the medium
//! underneath only ever sees flat keys mapped to encoded blobs. The first
//! path segment picks the medium key, everything deeper is navigated
//! inside the blob.
//!
//! ```rust
//! use stash::open;
//!
//! let storage = open("page").unwrap();
//! storage.set("doc.person.name.first", "John").unwrap();
//!
//! let person = storage.get("doc.person").unwrap();
//! assert_eq!(person, Some(serde_json::json!({"name": {"first": "John"}})));
//! # storage.remove("doc").unwrap();
//! ```

pub use stash_core::{
    Codec, CodecError, Error, JsonCodec, KeyPath, Map, Medium, MediumError, Storage, Value,
};
pub use stash_mediums::{
    open, open_namespace, resolve, LocalDiskMedium, MediumInput, MemoryMedium, SharedMemoryMedium,
};

#[cfg(feature = "async")]
pub use stash_core::{AsyncMedium, AsyncStorage, SyncToAsyncMedium};
