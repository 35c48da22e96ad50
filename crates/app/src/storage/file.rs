//! File-backed store.
//!
//! One JSON document per key under a base directory. Writes go to a sibling
//! temporary file first and are renamed into place, so a crash mid-write
//! leaves the previous value intact.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use super::{KeyValueStore, StorageError};

/// Store persisting each key to `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created lazily on
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Base directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(key)?) {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path(key)?;
        let tmp = path.with_extension("json.tmp");

        fs::create_dir_all(&self.dir)?;
        fs::write(&tmp, value)?;

        if let Err(error) = fs::rename(&tmp, &path) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                warn!(error = %cleanup, path = %tmp.display(), "failed to remove temporary file");
            }

            return Err(error.into());
        }

        debug!(key, path = %path.display(), bytes = value.len(), "stored value");

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path(key)?) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn writes_survive_a_new_store_instance() -> TestResult {
        let dir = tempfile::tempdir()?;

        FileStore::new(dir.path()).set("cart", r#"{"items":[]}"#)?;

        let reopened = FileStore::new(dir.path());

        assert_eq!(reopened.get("cart")?.as_deref(), Some(r#"{"items":[]}"#));

        Ok(())
    }

    #[test]
    fn missing_directory_reads_as_empty() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path().join("not-yet-created"));

        assert_eq!(store.get("cart")?, None);

        Ok(())
    }

    #[test]
    fn remove_is_idempotent() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path());

        store.set("user", "{}")?;
        store.remove("user")?;
        store.remove("user")?;

        assert_eq!(store.get("user")?, None);

        Ok(())
    }

    #[test]
    fn rejects_path_like_keys() {
        let store = FileStore::new("/tmp/comanda");

        assert!(matches!(
            store.get("../etc/passwd"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(store.set("", "x"), Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn write_into_a_file_path_fails() -> TestResult {
        let dir = tempfile::tempdir()?;
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "")?;

        let store = FileStore::new(&blocker);

        assert!(matches!(store.set("cart", "{}"), Err(StorageError::Io(_))));

        Ok(())
    }

    #[test]
    fn failed_rename_leaves_no_temporary_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let occupied = dir.path().join("cart.json");
        fs::create_dir(&occupied)?;
        fs::write(occupied.join("keep"), "")?;

        let store = FileStore::new(dir.path());

        assert!(matches!(store.set("cart", "{}"), Err(StorageError::Io(_))));
        assert!(!dir.path().join("cart.json.tmp").exists());
        assert!(occupied.join("keep").exists());

        Ok(())
    }
}
