//! Process-wide predefined mediums.
//!
//! `"page"` and `"session"` are both process-lifetime in-memory maps;
//! they exist as distinct globals so data kept in one never shows up in
//! the other. `"local"` persists to a JSON file in the platform's local
//! data directory, falling back to the page medium when no such
//! directory is usable.

use std::path::PathBuf;

use lazy_static::lazy_static;
use stash_medium::Medium;

use crate::local_disk::LocalDiskMedium;
use crate::memory::SharedMemoryMedium;

lazy_static! {
    static ref PAGE: SharedMemoryMedium = SharedMemoryMedium::new();
    static ref SESSION: SharedMemoryMedium = SharedMemoryMedium::new();
}

/// A handle to the process-wide page medium. Every call returns a handle
/// to the same shared map.
pub fn page() -> SharedMemoryMedium {
    PAGE.clone()
}

/// A handle to the process-wide session medium, separate from the page
/// medium.
pub fn session() -> SharedMemoryMedium {
    SESSION.clone()
}

fn local_file() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("stash").join("local.json"))
}

/// The local persistent medium: a JSON file under the platform's local
/// data directory.
///
/// When the platform has no local data directory, or the file cannot be
/// opened, this degrades to the page medium with a logged warning rather
/// than failing: data then lives for the process lifetime only.
pub fn local() -> Box<dyn Medium> {
    match local_file() {
        Some(path) => match LocalDiskMedium::open(&path) {
            Ok(medium) => return Box::new(medium),
            Err(e) => log::warn!(
                "cannot open local medium at {}: {}; keeping data in memory instead",
                path.display(),
                e
            ),
        },
        None => log::warn!("no local data directory on this platform; keeping data in memory instead"),
    }
    Box::new(page())
}
