//! Repository port for value-table persistence.
//!
//! This module defines the trait boundary between the learning core and
//! the storage format used for trained models.

use std::path::Path;

use crate::{Result, q_learning::ValueTable};

/// Port for persisting and loading value tables.
///
/// # Examples
///
/// ```no_run
/// use wumpus_agent::adapters::TextModelRepository;
/// use wumpus_agent::ports::ModelRepository;
/// use wumpus_agent::q_learning::ValueTable;
/// use std::path::Path;
///
/// let repo = TextModelRepository;
/// let table = ValueTable::new(6);
/// repo.save(&table, Path::new("model.txt"))?;
/// let loaded = repo.load(Path::new("model.txt"), 6)?;
/// # Ok::<(), wumpus_agent::Error>(())
/// ```
pub trait ModelRepository: Send {
    /// Save a table to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the target cannot be created or written to.
    fn save(&self, table: &ValueTable, path: &Path) -> Result<()>;

    /// Load a table whose rows hold `width` action values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - Any row is malformed
    fn load(&self, path: &Path, width: usize) -> Result<ValueTable>;
}
