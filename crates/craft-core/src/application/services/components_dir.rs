//! Destination directory lookup.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{application::ports::Filesystem, error::CraftResult};

/// Conventional components directories, highest priority first.
const CANDIDATES: [&[&str]; 3] = [&["app", "components"], &["src", "components"], &["components"]];

/// Directories whose presence marks a monorepo root.
const MONOREPO_MARKERS: [&str; 2] = ["packages", "apps"];

/// Where the payload goes, and whether this run had to create it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDirectory {
    pub path: PathBuf,
    pub created: bool,
}

pub struct ComponentsDirectoryResolver;

impl ComponentsDirectoryResolver {
    /// First existing candidate, without creating anything.
    pub fn locate(fs: &dyn Filesystem, root: &Path) -> Option<PathBuf> {
        CANDIDATES
            .iter()
            .map(|segments| segments.iter().fold(root.to_path_buf(), |p, s| p.join(s)))
            .find(|candidate| fs.is_dir(candidate))
    }

    /// Path the bare top-level directory would have.
    pub fn fallback(root: &Path) -> PathBuf {
        root.join("components")
    }

    /// First existing candidate, or the bare top-level directory, created
    /// if missing. Safe to call repeatedly.
    pub fn resolve(fs: &dyn Filesystem, root: &Path) -> CraftResult<ResolvedDirectory> {
        if let Some(found) = Self::locate(fs, root) {
            debug!(path = %found.display(), "Using existing components directory");
            return Ok(ResolvedDirectory {
                path: found,
                created: false,
            });
        }

        let dir = Self::fallback(root);
        fs.create_dir_all(&dir)?;
        info!(path = %dir.display(), "Created components directory");
        Ok(ResolvedDirectory {
            path: dir,
            created: true,
        })
    }

    /// Monorepo roots only change the advisory message, never the path.
    pub fn is_monorepo(fs: &dyn Filesystem, root: &Path) -> bool {
        MONOREPO_MARKERS
            .iter()
            .any(|marker| fs.is_dir(&root.join(marker)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::fake;
    use mockall::predicate::eq;

    #[test]
    fn app_components_has_priority() {
        let fs = fake::tree(&[], &["/p", "/p/app/components", "/p/src/components"]);
        assert_eq!(
            ComponentsDirectoryResolver::locate(&fs, Path::new("/p")),
            Some(PathBuf::from("/p/app/components"))
        );
    }

    #[test]
    fn src_components_beats_top_level() {
        let fs = fake::tree(&[], &["/p", "/p/src/components", "/p/components"]);
        assert_eq!(
            ComponentsDirectoryResolver::resolve(&fs, Path::new("/p")).unwrap(),
            ResolvedDirectory {
                path: PathBuf::from("/p/src/components"),
                created: false,
            }
        );
    }

    #[test]
    fn missing_directory_is_created_at_top_level() {
        let mut fs = fake::tree(&[], &["/p"]);
        fs.expect_create_dir_all()
            .with(eq(Path::new("/p/components")))
            .times(1)
            .returning(|_| Ok(()));

        assert_eq!(
            ComponentsDirectoryResolver::resolve(&fs, Path::new("/p")).unwrap(),
            ResolvedDirectory {
                path: PathBuf::from("/p/components"),
                created: true,
            }
        );
    }

    #[test]
    fn plain_file_named_components_is_ignored() {
        let fs = fake::tree(&[("/p/app/components", "")], &["/p", "/p/components"]);
        assert_eq!(
            ComponentsDirectoryResolver::locate(&fs, Path::new("/p")),
            Some(PathBuf::from("/p/components"))
        );
    }

    #[test]
    fn monorepo_markers() {
        let root = Path::new("/p");
        assert!(ComponentsDirectoryResolver::is_monorepo(
            &fake::tree(&[], &["/p", "/p/packages"]),
            root
        ));
        assert!(ComponentsDirectoryResolver::is_monorepo(
            &fake::tree(&[], &["/p", "/p/apps"]),
            root
        ));
        assert!(!ComponentsDirectoryResolver::is_monorepo(
            &fake::tree(&[], &["/p"]),
            root
        ));
    }
}
