//! Best score persistence
//!
//! The only durable state is a single best score. The simulation never
//! touches storage: the host reads the value once at startup and writes it
//! back whenever the core raises `GameEvent::NewBestScore`.

#[cfg(not(target_arch = "wasm32"))]
use std::io::Write;
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors writing the best score
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// On-disk / in-storage record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScoreRecord {
    pub best: u64,
}

/// Somewhere a best score can live between sessions
pub trait BestScoreStore {
    /// Read the stored best score (0 if nothing usable is stored)
    fn load(&self) -> u64;

    /// Persist a new best score
    fn save(&mut self, best: u64) -> Result<(), StoreError>;
}

/// Volatile store (tests, hosts without storage)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: u64,
    /// Number of successful saves
    pub writes: usize,
}

impl MemoryStore {
    pub fn new(best: u64) -> Self {
        Self { best, writes: 0 }
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        self.best
    }

    fn save(&mut self, best: u64) -> Result<(), StoreError> {
        self.best = best;
        self.writes += 1;
        Ok(())
    }
}

/// JSON file store (native)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl BestScoreStore for JsonFileStore {
    fn load(&self) -> u64 {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No best score at {}, starting fresh", self.path.display());
                return 0;
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", self.path.display(), e);
                return 0;
            }
        };

        match serde_json::from_str::<BestScoreRecord>(&json) {
            Ok(record) => {
                log::info!("Loaded best score {}", record.best);
                record.best
            }
            Err(e) => {
                log::warn!("Ignoring corrupt best score file {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, best: u64) -> Result<(), StoreError> {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };
        let json = serde_json::to_string(&BestScoreRecord { best })?;

        // A failed persist drops the temp file, which removes it
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        log::info!("Best score {} saved to {}", best, self.path.display());
        Ok(())
    }
}

/// Browser LocalStorage store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "kong_dash_best";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl BestScoreStore for LocalStorageStore {
    fn load(&self) -> u64 {
        let stored = Self::storage().and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten());
        match stored.map(|json| serde_json::from_str::<BestScoreRecord>(&json)) {
            Some(Ok(record)) => {
                log::info!("Loaded best score {}", record.best);
                record.best
            }
            Some(Err(e)) => {
                log::warn!("Ignoring corrupt best score: {}", e);
                0
            }
            None => {
                log::info!("No best score found, starting fresh");
                0
            }
        }
    }

    fn save(&mut self, best: u64) -> Result<(), StoreError> {
        let storage = Self::storage()
            .ok_or_else(|| StoreError::Unavailable("LocalStorage is not available".into()))?;
        let json = serde_json::to_string(&BestScoreRecord { best })?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;
        log::info!("Best score {} saved", best);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new(3000);
        assert_eq!(store.load(), 3000);
        store.save(5000).unwrap();
        assert_eq!(store.load(), 5000);
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_file_store_missing_file_is_zero() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("best.json"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_file_store_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores").join("best.json");
        let mut store = JsonFileStore::new(&path);
        store.save(4321).unwrap();
        store.save(5000).unwrap();
        assert_eq!(JsonFileStore::new(&path).load(), 5000);
    }

    #[test]
    fn test_file_store_corrupt_file_is_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("best.json");
        std::fs::write(&path, "not json at all").unwrap();
        assert_eq!(JsonFileStore::new(&path).load(), 0);
    }

    #[test]
    fn test_failed_save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("best.json");
        // A directory in the way makes the final rename fail
        std::fs::create_dir(&path).unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(matches!(store.save(10), Err(StoreError::Io(_))));

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("best.json")]);
    }
}
