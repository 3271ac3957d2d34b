//! Materializes the payload at the destination.

use std::path::Path;

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::Payload,
};

pub struct FileWriter<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> FileWriter<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Write every payload file below `destination`, creating directories
    /// as needed. Returns the number of files written.
    ///
    /// The first I/O error stops the write; cleaning up is the caller's job.
    #[instrument(skip_all, fields(destination = %destination.display()))]
    pub fn write(&self, payload: &Payload, destination: &Path) -> Result<usize, ApplicationError> {
        let failed = |path: &Path, reason: String| ApplicationError::WriteFailed {
            path: path.to_path_buf(),
            reason,
        };

        self.fs
            .create_dir_all(destination)
            .map_err(|e| failed(destination, e.to_string()))?;

        for file in payload.files() {
            let path = destination.join(file.path.as_path());
            if let Some(parent) = path.parent().filter(|p| *p != destination) {
                self.fs
                    .create_dir_all(parent)
                    .map_err(|e| failed(parent, e.to_string()))?;
            }
            self.fs
                .write_file(&path, &file.normalized_content())
                .map_err(|e| failed(&path, e.to_string()))?;
            debug!(path = %path.display(), "Wrote payload file");
        }

        Ok(payload.file_count())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::application::ports::output::MockFilesystem;

    type Written = Arc<Mutex<Vec<(PathBuf, String)>>>;

    fn recording_fs() -> (MockFilesystem, Written, Written) {
        let dirs: Written = Arc::default();
        let files: Written = Arc::default();
        let mut fs = MockFilesystem::new();

        let log = Arc::clone(&dirs);
        fs.expect_create_dir_all().returning(move |path| {
            log.lock().unwrap().push((path.to_path_buf(), String::new()));
            Ok(())
        });
        let log = Arc::clone(&files);
        fs.expect_write_file().returning(move |path, content| {
            log.lock().unwrap().push((path.to_path_buf(), content.to_string()));
            Ok(())
        });
        (fs, dirs, files)
    }

    #[test]
    fn writes_normalized_files_below_destination() {
        let (fs, dirs, files) = recording_fs();
        let payload = Payload::new()
            .with_file("index.ts", "export * from \"./layout\";\n\n\n")
            .unwrap()
            .with_file("styles/prose.css", ".prose {}")
            .unwrap();

        let count = FileWriter::new(&fs)
            .write(&payload, Path::new("/p/components/ds"))
            .unwrap();
        assert_eq!(count, 2);

        let dirs: Vec<PathBuf> = dirs.lock().unwrap().iter().map(|(p, _)| p.clone()).collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/p/components/ds"),
                PathBuf::from("/p/components/ds/styles"),
            ]
        );
        assert_eq!(
            *files.lock().unwrap(),
            vec![
                (
                    PathBuf::from("/p/components/ds/index.ts"),
                    "export * from \"./layout\";\n".to_string()
                ),
                (
                    PathBuf::from("/p/components/ds/styles/prose.css"),
                    ".prose {}\n".to_string()
                ),
            ]
        );
    }

    #[test]
    fn first_failure_stops_and_names_the_file() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().times(1).returning(|path, _| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });
        let payload = Payload::new()
            .with_file("a.ts", "a")
            .unwrap()
            .with_file("b.ts", "b")
            .unwrap();

        match FileWriter::new(&fs).write(&payload, Path::new("/p/ds")) {
            Err(ApplicationError::WriteFailed { path, reason }) => {
                assert_eq!(path, Path::new("/p/ds/a.ts"));
                assert!(reason.contains("disk full"));
            }
            other => panic!("expected WriteFailed, got {other:?}"),
        }
    }

    #[test]
    fn unwritable_destination_fails_before_any_file() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|path| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "read-only".into(),
            }
            .into())
        });
        fs.expect_write_file().never();
        let payload = Payload::new().with_file("a.ts", "a").unwrap();

        assert!(matches!(
            FileWriter::new(&fs).write(&payload, Path::new("/p/ds")),
            Err(ApplicationError::WriteFailed { .. })
        ));
    }
}
