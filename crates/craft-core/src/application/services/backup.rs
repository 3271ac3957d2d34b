//! Reversible relocation of an install that is about to be overwritten.
//!
//! A backup is a compensating transaction over a single path:
//!
//! 1. [`BackupManager::backup`] renames the path to a timestamped sibling.
//! 2. The caller mutates the original location.
//! 3. [`BackupManager::commit`] keeps the backup and releases the record, or
//!    [`BackupManager::restore`] puts the old content back.
//!
//! Only rename-level atomicity is available, so this is not a true atomic
//! commit. At most one record exists per run.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use crate::application::{ApplicationError, ports::Filesystem};

/// A rename performed before a destructive write.
#[must_use = "a backup must be committed or restored"]
#[derive(Debug, PartialEq, Eq)]
pub struct BackupRecord {
    original: PathBuf,
    backup: PathBuf,
}

impl BackupRecord {
    pub fn original(&self) -> &Path {
        &self.original
    }

    pub fn backup(&self) -> &Path {
        &self.backup
    }
}

pub struct BackupManager<'a> {
    fs: &'a dyn Filesystem,
    stamp: String,
}

impl<'a> BackupManager<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self::at(fs, Utc::now())
    }

    /// Manager whose backup names use `now` as their timestamp.
    pub fn at(fs: &'a dyn Filesystem, now: DateTime<Utc>) -> Self {
        Self {
            fs,
            stamp: now.format("%Y%m%d-%H%M%S-%6f").to_string(),
        }
    }

    /// Rename `path` to `<file-name>.backup-<stamp>` next to it.
    ///
    /// A numeric suffix is appended while the name is taken, so two backups
    /// in the same run never collide.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn backup(&self, path: &Path) -> Result<BackupRecord, ApplicationError> {
        let failed = |reason: String| ApplicationError::BackupFailed {
            path: path.to_path_buf(),
            reason,
        };

        if !self.fs.exists(path) {
            return Err(failed("nothing to back up".into()));
        }
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| failed("path has no usable file name".into()))?;

        let backup = (0u32..)
            .map(|n| {
                let suffix = if n == 0 {
                    String::new()
                } else {
                    format!("-{n}")
                };
                path.with_file_name(format!("{file_name}.backup-{}{suffix}", self.stamp))
            })
            .find(|candidate| !self.fs.exists(candidate))
            .ok_or_else(|| failed("no free backup name".into()))?;

        self.fs
            .rename(path, &backup)
            .map_err(|e| failed(e.to_string()))?;

        info!(backup = %backup.display(), "Backup created");
        Ok(BackupRecord {
            original: path.to_path_buf(),
            backup,
        })
    }

    /// Undo the backup: drop whatever now sits at the original path, then
    /// rename the backup back into place.
    #[instrument(skip_all, fields(original = %record.original.display()))]
    pub fn restore(&self, record: BackupRecord) -> Result<(), ApplicationError> {
        let failed = |reason: String| ApplicationError::RestoreFailed {
            original: record.original.clone(),
            backup: record.backup.clone(),
            reason,
            cause: None,
        };

        if self.fs.is_dir(&record.original) {
            self.fs
                .remove_dir_all(&record.original)
                .map_err(|e| failed(e.to_string()))?;
        } else if self.fs.exists(&record.original) {
            self.fs
                .remove_file(&record.original)
                .map_err(|e| failed(e.to_string()))?;
        }

        self.fs
            .rename(&record.backup, &record.original)
            .map_err(|e| {
                warn!(backup = %record.backup.display(), "Restore rename failed");
                failed(e.to_string())
            })?;

        info!("Backup restored");
        Ok(())
    }

    /// Keep the backup on disk and release the record. Returns its location.
    pub fn commit(&self, record: BackupRecord) -> PathBuf {
        info!(backup = %record.backup.display(), "Backup kept");
        record.backup
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::{MockFilesystem, fake};
    use chrono::TimeZone;
    use mockall::predicate::eq;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap()
    }

    #[test]
    fn stamp_format_is_sortable() {
        let fs = fake::tree(&[], &[]);
        let manager = BackupManager::at(&fs, fixed_time());
        assert_eq!(manager.stamp, "20260304-050607-000000");
    }

    #[test]
    fn nothing_to_back_up_is_an_error() {
        let fs = fake::tree(&[], &[]);
        let manager = BackupManager::at(&fs, fixed_time());
        assert!(matches!(
            manager.backup(Path::new("/p/components/ds")),
            Err(ApplicationError::BackupFailed { .. })
        ));
    }

    #[test]
    fn taken_backup_name_gets_a_suffix() {
        let mut fs = fake::tree(
            &[("/p/components/ds.tsx", "legacy")],
            &["/p/components/ds.tsx.backup-20260304-050607-000000"],
        );
        fs.expect_rename()
            .with(
                eq(Path::new("/p/components/ds.tsx")),
                eq(Path::new(
                    "/p/components/ds.tsx.backup-20260304-050607-000000-1",
                )),
            )
            .times(1)
            .returning(|_, _| Ok(()));

        let record = BackupManager::at(&fs, fixed_time())
            .backup(Path::new("/p/components/ds.tsx"))
            .unwrap();
        assert_eq!(record.original(), Path::new("/p/components/ds.tsx"));
        assert!(record.backup().ends_with("ds.tsx.backup-20260304-050607-000000-1"));
    }

    #[test]
    fn failed_rename_is_a_backup_failure() {
        let mut fs = fake::tree(&[], &["/p/components/ds"]);
        fs.expect_rename().returning(|from, _| {
            Err(ApplicationError::FilesystemError {
                path: from.to_path_buf(),
                reason: "permission denied".into(),
            }
            .into())
        });

        let err = BackupManager::at(&fs, fixed_time())
            .backup(Path::new("/p/components/ds"))
            .unwrap_err();
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn restore_clears_partial_directory_first() {
        let mut fs = MockFilesystem::new();
        let mut seq = mockall::Sequence::new();
        fs.expect_is_dir()
            .with(eq(Path::new("/p/components/ds")))
            .return_const(true);
        fs.expect_remove_dir_all()
            .with(eq(Path::new("/p/components/ds")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        fs.expect_rename()
            .with(
                eq(Path::new("/p/components/ds.backup-x")),
                eq(Path::new("/p/components/ds")),
            )
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let record = BackupRecord {
            original: PathBuf::from("/p/components/ds"),
            backup: PathBuf::from("/p/components/ds.backup-x"),
        };
        BackupManager::at(&fs, fixed_time()).restore(record).unwrap();
    }

    #[test]
    fn failed_restore_names_the_backup() {
        let mut fs = fake::tree(&[], &[]);
        fs.expect_rename().returning(|from, _| {
            Err(ApplicationError::FilesystemError {
                path: from.to_path_buf(),
                reason: "busy".into(),
            }
            .into())
        });

        let record = BackupRecord {
            original: PathBuf::from("/p/components/ds"),
            backup: PathBuf::from("/p/components/ds.backup-x"),
        };
        match BackupManager::at(&fs, fixed_time()).restore(record) {
            Err(ApplicationError::RestoreFailed { backup, .. }) => {
                assert_eq!(backup, Path::new("/p/components/ds.backup-x"));
            }
            other => panic!("expected RestoreFailed, got {other:?}"),
        }
    }

    #[test]
    fn commit_keeps_backup() {
        let fs = fake::tree(&[], &[]);
        let record = BackupRecord {
            original: PathBuf::from("/p/ds"),
            backup: PathBuf::from("/p/ds.backup-x"),
        };
        assert_eq!(
            BackupManager::at(&fs, fixed_time()).commit(record),
            PathBuf::from("/p/ds.backup-x")
        );
    }
}
