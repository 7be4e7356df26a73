//! A file-backed medium.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{fs, io};

use stash_medium::{Medium, MediumError};

/// A medium persisted as one JSON object file on local disk.
///
/// The file maps flat keys to their raw encoded blobs, exactly mirroring
/// the in-memory shape. The whole file is loaded at open time and written
/// back after every mutation, so this is only suitable for small stores;
/// reads are served from memory.
///
/// A missing file opens as an empty medium; the file and its parent
/// directories are created on the first write.
pub struct LocalDiskMedium {
    path: PathBuf,
    data: BTreeMap<String, String>,
}

impl LocalDiskMedium {
    /// Open the medium backed by the JSON object file at `path`.
    ///
    /// Fails if the file exists but cannot be read or is not a JSON
    /// object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, MediumError> {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)
                .map_err(|e| MediumError::Transport(Box::new(e)))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(LocalDiskMedium { path, data })
    }

    /// The file this medium persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), MediumError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string(&self.data)
            .map_err(|e| MediumError::Transport(Box::new(e)))?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl Medium for LocalDiskMedium {
    fn get(&mut self, key: &str) -> Result<Option<String>, MediumError> {
        Ok(self.data.get(key).cloned())
    }

    fn all(&mut self) -> Result<BTreeMap<String, String>, MediumError> {
        Ok(self.data.clone())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), MediumError> {
        self.data.insert(key.to_string(), value);
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<(), MediumError> {
        self.data.remove(key);
        self.persist()
    }

    fn clear(&mut self) -> Result<(), MediumError> {
        self.data.clear();
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut medium = LocalDiskMedium::open(dir.path().join("store.json")).unwrap();
        assert!(medium.all().unwrap().is_empty());
    }

    #[test]
    fn writes_survive_a_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut medium = LocalDiskMedium::open(&path).unwrap();
        medium.set("person", "{\"age\":42}".to_string()).unwrap();
        drop(medium);

        let mut reopened = LocalDiskMedium::open(&path).unwrap();
        assert_eq!(
            reopened.get("person").unwrap(),
            Some("{\"age\":42}".to_string())
        );
    }

    #[test]
    fn parent_directories_are_created_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("store.json");

        let mut medium = LocalDiskMedium::open(&path).unwrap();
        medium.set("k", "\"v\"".to_string()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn remove_and_clear_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut medium = LocalDiskMedium::open(&path).unwrap();
        medium.set("a", "1".to_string()).unwrap();
        medium.set("b", "2".to_string()).unwrap();
        medium.remove("a").unwrap();
        drop(medium);

        let mut reopened = LocalDiskMedium::open(&path).unwrap();
        assert_eq!(reopened.get("a").unwrap(), None);
        assert_eq!(reopened.get("b").unwrap(), Some("2".to_string()));

        reopened.clear().unwrap();
        drop(reopened);
        assert!(LocalDiskMedium::open(&path).unwrap().all().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            LocalDiskMedium::open(&path),
            Err(MediumError::Transport(_))
        ));
    }
}
