//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use craft_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{CraftError, CraftResult},
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can keep a handle after boxing one into a
/// service. Failures can be injected for writes below a path and for
/// renames after a number of successful ones.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    fail_writes_under: Option<PathBuf>,
    renames_left: Option<usize>,
}

/// Point-in-time copy of the whole tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub files: BTreeMap<PathBuf, String>,
    pub directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Add a file, creating its parent directories.
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                inner.insert_dirs(parent);
            }
            inner.files.insert(path.to_path_buf(), content.to_string());
        }
        self
    }

    /// Add a directory and its parents.
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.insert_dirs(path.as_ref());
        }
        self
    }

    /// Make every write below `path` fail.
    pub fn fail_writes_under(&self, path: impl Into<PathBuf>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.fail_writes_under = Some(path.into());
        }
    }

    /// Let `count` renames succeed, then fail every later one.
    pub fn fail_renames_after(&self, count: usize) {
        if let Ok(mut inner) = self.inner.write() {
            inner.renames_left = Some(count);
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Direct children of `dir`, files and directories, sorted.
    pub fn children(&self, dir: impl AsRef<Path>) -> Vec<PathBuf> {
        let dir = dir.as_ref();
        let Ok(inner) = self.inner.read() else {
            return Vec::new();
        };
        inner
            .directories
            .iter()
            .chain(inner.files.keys())
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.inner
            .read()
            .map(|inner| Snapshot {
                files: inner.files.clone(),
                directories: inner.directories.clone(),
            })
            .unwrap_or_else(|_| Snapshot {
                files: BTreeMap::new(),
                directories: BTreeSet::new(),
            })
    }

    fn read(&self) -> CraftResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned.into())
    }

    fn write(&self) -> CraftResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned.into())
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFilesystemInner {
    fn insert_dirs(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.directories.contains(path)
    }

    fn check_writable(&self, path: &Path) -> CraftResult<()> {
        match &self.fail_writes_under {
            Some(root) if path.starts_with(root) => Err(error(path, "injected write failure")),
            _ => Ok(()),
        }
    }
}

fn error(path: &Path, reason: &str) -> CraftError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

/// `path` with its `from` prefix swapped for `to`.
fn rebase(path: &Path, from: &Path, to: &Path) -> PathBuf {
    match path.strip_prefix(from) {
        Ok(rest) if rest.as_os_str().is_empty() => to.to_path_buf(),
        Ok(rest) => to.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> CraftResult<()> {
        let mut inner = self.write()?;
        inner.check_writable(path)?;
        if inner.files.contains_key(path) {
            return Err(error(path, "a file exists at this path"));
        }
        inner.insert_dirs(path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> CraftResult<()> {
        let mut inner = self.write()?;
        inner.check_writable(path)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(error(path, "Parent directory does not exist"));
            }
        }
        if inner.directories.contains(path) {
            return Err(error(path, "a directory exists at this path"));
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> CraftResult<String> {
        self.read()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| error(path, "No such file"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.exists(path))
            .unwrap_or(false)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn rename(&self, from: &Path, to: &Path) -> CraftResult<()> {
        let mut inner = self.write()?;

        match inner.renames_left {
            Some(0) => return Err(error(from, "injected rename failure")),
            Some(ref mut left) => *left -= 1,
            None => {}
        }
        if !inner.exists(from) {
            return Err(error(from, "No such file or directory"));
        }
        if inner.exists(to) {
            return Err(error(to, "Destination already exists"));
        }

        if let Some(content) = inner.files.remove(from) {
            inner.files.insert(to.to_path_buf(), content);
            return Ok(());
        }

        let moved_dirs: Vec<PathBuf> = inner
            .directories
            .iter()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for dir in moved_dirs {
            inner.directories.remove(&dir);
            inner.directories.insert(rebase(&dir, from, to));
        }

        let moved_files: Vec<PathBuf> = inner
            .files
            .keys()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for file in moved_files {
            if let Some(content) = inner.files.remove(&file) {
                inner.files.insert(rebase(&file, from, to), content);
            }
        }

        Ok(())
    }

    fn remove_file(&self, path: &Path) -> CraftResult<()> {
        self.write()?
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| error(path, "No such file"))
    }

    fn remove_dir(&self, path: &Path) -> CraftResult<()> {
        let mut inner = self.write()?;
        if !inner.directories.contains(path) {
            return Err(error(path, "No such directory"));
        }
        let occupied = inner
            .directories
            .iter()
            .chain(inner.files.keys())
            .any(|p| p.parent() == Some(path));
        if occupied {
            return Err(error(path, "Directory not empty"));
        }

        inner.directories.remove(path);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> CraftResult<()> {
        let mut inner = self.write()?;
        if !inner.directories.contains(path) {
            return Err(error(path, "No such directory"));
        }

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));

        Ok(())
    }
}
