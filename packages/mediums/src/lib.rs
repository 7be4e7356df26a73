//! Concrete mediums and the resolver that turns loose inputs into them.
//!
//! Three predefined mediums ship with stash:
//!
//! * `"page"` - a process-wide shared in-memory map.
//! * `"session"` - a second process-wide map, separate from `"page"`.
//! * `"local"` - a JSON file in the platform's local data directory,
//!   degrading to `"page"` when the platform has none.
//!
//! [`open`] and [`open_namespace`] are the usual entry points; they accept
//! a predefined medium name, a map of raw blobs, or any boxed
//! [`Medium`](stash_medium::Medium) implementation.

mod local_disk;
mod memory;
pub mod registry;
mod resolver;

pub use local_disk::LocalDiskMedium;
pub use memory::{MemoryMedium, SharedMemoryMedium};
pub use resolver::{open, open_namespace, resolve, MediumInput};
