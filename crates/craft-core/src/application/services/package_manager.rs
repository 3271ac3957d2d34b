//! Infers the package manager from lockfiles.

use std::path::Path;

use tracing::debug;

use crate::{application::ports::Filesystem, domain::PackageManagerKind};

pub struct PackageManagerResolver;

impl PackageManagerResolver {
    /// First lockfile in [`PackageManagerKind::LOOKUP_ORDER`] wins; pnpm when
    /// none is found. Depends on nothing but the files under `root`.
    pub fn resolve(fs: &dyn Filesystem, root: &Path) -> PackageManagerKind {
        let kind = PackageManagerKind::LOOKUP_ORDER
            .into_iter()
            .find(|kind| fs.is_file(&root.join(kind.lockfile())))
            .unwrap_or(PackageManagerKind::DEFAULT);
        debug!(package_manager = %kind, "Package manager resolved");
        kind
    }
}
