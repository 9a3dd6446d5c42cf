//! Page writer abstraction.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Destination for generated page files.
///
/// Paths are relative to the writer's root.
pub trait PageWriter {
    /// Create `dir` and its parents. Returns `true` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn ensure_dir(&self, dir: &Path) -> io::Result<bool>;

    /// Write `content` to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// Filesystem writer rooted at a project directory.
#[derive(Debug, Clone)]
pub struct FsWriter {
    root: PathBuf,
}

impl FsWriter {
    /// Create a writer resolving relative paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl PageWriter for FsWriter {
    fn ensure_dir(&self, dir: &Path) -> io::Result<bool> {
        let full = self.resolve(dir);
        if full.is_dir() {
            return Ok(false);
        }
        fs::create_dir_all(&full)?;
        Ok(true)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        fs::write(self.resolve(path), content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_dir_reports_creation() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FsWriter::new(dir.path());

        assert!(writer.ensure_dir(Path::new("app/docs/x")).unwrap());
        assert!(!writer.ensure_dir(Path::new("app/docs/x")).unwrap());
        assert!(dir.path().join("app/docs/x").is_dir());
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FsWriter::new(dir.path());
        writer.write(Path::new("page.html"), "old").unwrap();
        writer.write(Path::new("page.html"), "new").unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("page.html")).unwrap(), "new");
    }
}
