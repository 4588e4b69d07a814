use std::fs;
use std::path::PathBuf;

use crate::store::{KeyValueStore, StoreError, StoreSnapshot};

/// JSON-file backed store for native sessions.
///
/// The whole snapshot is rewritten on every `set`; the state is a handful of
/// short strings.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    snapshot: StoreSnapshot,
}

impl FileStore {
    /// Open `path`, starting empty if it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let snapshot = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => StoreSnapshot::default(),
            Ok(raw) => serde_json::from_str::<StoreSnapshot>(&raw)
                .map_err(|e| StoreError::Corrupt(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreSnapshot::default(),
            Err(e) => return Err(StoreError::Io(format!("read {}: {e}", path.display()))),
        };
        Ok(Self { path, snapshot })
    }

    fn flush(&self) -> Result<(), StoreError> {
        let raw =
            serde_json::to_string_pretty(&self.snapshot).map_err(|e| StoreError::Io(e.to_string()))?;
        fs::write(&self.path, raw)
            .map_err(|e| StoreError::Io(format!("write {}: {e}", self.path.display())))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.snapshot.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.snapshot
            .values
            .insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::FileStore;
    use crate::store::{KeyValueStore, StoreError};

    #[test]
    fn missing_file_opens_empty_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");

        let mut s = FileStore::open(&path).unwrap();
        assert_eq!(s.get("map.airports"), Ok(None));
        s.set("map.airports", "KJFK,KSFO").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("map.airports").unwrap().as_deref(),
            Some("KJFK,KSFO")
        );
    }

    #[test]
    fn garbage_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(FileStore::open(&path), Err(StoreError::Corrupt(_))));
    }
}
