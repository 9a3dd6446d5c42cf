//! In-memory page writer for testing.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::writer::PageWriter;

/// Page writer that keeps files in memory.
///
/// Paths registered with [`MemoryWriter::with_failure`] reject writes,
/// which lets tests exercise per-item failure handling.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    dirs: RwLock<BTreeSet<PathBuf>>,
    files: RwLock<BTreeMap<PathBuf, String>>,
    failing: BTreeSet<PathBuf>,
}

impl MemoryWriter {
    /// Create an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make writes to `path` fail with `PermissionDenied`.
    #[must_use]
    pub fn with_failure(mut self, path: impl Into<PathBuf>) -> Self {
        self.failing.insert(path.into());
        self
    }

    /// Content written to `path`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn content(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.read().unwrap().get(path.as_ref()).cloned()
    }

    /// True if `dir` was created.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn has_dir(&self, dir: impl AsRef<Path>) -> bool {
        self.dirs.read().unwrap().contains(dir.as_ref())
    }
}

impl PageWriter for MemoryWriter {
    fn ensure_dir(&self, dir: &Path) -> io::Result<bool> {
        let mut dirs = self.dirs.write().map_err(|_| io::Error::other("lock poisoned"))?;
        let mut created = false;
        for ancestor in dir.ancestors().filter(|a| !a.as_os_str().is_empty()) {
            created |= dirs.insert(ancestor.to_path_buf());
        }
        Ok(created)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        if self.failing.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("write to {} rejected", path.display()),
            ));
        }
        self.files
            .write()
            .map_err(|_| io::Error::other("lock poisoned"))?
            .insert(path.to_owned(), content.to_owned());
        Ok(())
    }
}
