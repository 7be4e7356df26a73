//! Medium traits for stash: the flat storage layer.
//!
//! This is the narrow waist of the stash stack. A medium is a flat
//! string-keyed store of string blobs - no path semantics, no value
//! interpretation, no encoding. Hierarchy and JSON live in the layers above.
//!
//! Use this layer for:
//! - Wrapping a concrete backend (an in-memory map, a file, a remote KV store)
//! - Anything that moves opaque blobs without inspecting them
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use stash_medium::{Medium, MediumError};
//!
//! struct MapMedium {
//!     data: BTreeMap<String, String>,
//! }
//!
//! impl Medium for MapMedium {
//!     fn get(&mut self, key: &str) -> Result<Option<String>, MediumError> {
//!         Ok(self.data.get(key).cloned())
//!     }
//!
//!     fn all(&mut self) -> Result<BTreeMap<String, String>, MediumError> {
//!         Ok(self.data.clone())
//!     }
//!
//!     fn set(&mut self, key: &str, value: String) -> Result<(), MediumError> {
//!         self.data.insert(key.to_string(), value);
//!         Ok(())
//!     }
//!
//!     fn remove(&mut self, key: &str) -> Result<(), MediumError> {
//!         self.data.remove(key);
//!         Ok(())
//!     }
//!
//!     fn clear(&mut self) -> Result<(), MediumError> {
//!         self.data.clear();
//!         Ok(())
//!     }
//! }
//! ```
//!
//! # Async Support
//!
//! Enable the `async` feature for async trait variants:
//!
//! ```toml
//! [dependencies]
//! stash-medium = { version = "0.1", features = ["async"] }
//! ```
//!
//! Then use `AsyncMedium`, or adapt a sync medium with `SyncToAsyncMedium`.

mod error;
mod traits;

pub use error::MediumError;
pub use traits::Medium;

#[cfg(feature = "async")]
mod async_traits;

#[cfg(feature = "async")]
pub use async_traits::{AsyncMedium, SyncToAsyncMedium};
