//! In-memory model repository for testing.
//!
//! Stores models as their text encoding in a shared map, so tests exercise
//! the same format as files without touching the file system.

use std::{
    collections::HashMap,
    io::Cursor,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{
    Result,
    adapters::TextModelRepository,
    error::Error,
    ports::ModelRepository,
    q_learning::ValueTable,
};

/// In-memory repository for testing.
///
/// # Examples
///
/// ```
/// use wumpus_agent::adapters::InMemoryRepository;
/// use wumpus_agent::ports::ModelRepository;
/// use wumpus_agent::q_learning::ValueTable;
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// repo.save(&ValueTable::new(4), Path::new("model"))?;
/// let loaded = repo.load(Path::new("model"), 4)?;
/// assert!(loaded.is_empty());
/// # Ok::<(), wumpus_agent::Error>(())
/// ```
///
/// All clones share the same underlying storage.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw model text, e.g. to simulate a corrupt file.
    pub fn insert_raw(&self, path: &Path, contents: &str) {
        self.lock()
            .insert(path.to_path_buf(), contents.as_bytes().to_vec());
    }

    /// Raw model text stored at `path`.
    pub fn raw(&self, path: &Path) -> Option<String> {
        self.lock()
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Get the number of models currently stored.
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, Vec<u8>>> {
        // A poisoned map still holds consistent bytes.
        self.storage
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ModelRepository for InMemoryRepository {
    fn save(&self, table: &ValueTable, path: &Path) -> Result<()> {
        let mut bytes = Vec::new();
        TextModelRepository::write_table(table, &mut bytes).map_err(|source| {
            Error::ModelSave {
                path: path.to_path_buf(),
                source,
            }
        })?;
        self.lock().insert(path.to_path_buf(), bytes);
        Ok(())
    }

    fn load(&self, path: &Path, width: usize) -> Result<ValueTable> {
        let bytes = self.lock().get(path).cloned().ok_or_else(|| Error::ModelLoad {
            path: path.to_path_buf(),
            reason: "not found in memory".to_string(),
        })?;
        TextModelRepository::read_table(Cursor::new(bytes), width).map_err(|err| {
            Error::ModelLoad {
                path: path.to_path_buf(),
                reason: err.to_string(),
            }
        })
    }
}
