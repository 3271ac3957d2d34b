use std::collections::HashSet;
use std::fmt;

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// Which manifest group a required package belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyGroup {
    Runtime,
    Development,
}

impl fmt::Display for DependencyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Runtime => write!(f, "dependencies"),
            Self::Development => write!(f, "devDependencies"),
        }
    }
}

/// A third-party package the payload needs in the host project.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Requirement {
    pub name: String,
    pub group: DependencyGroup,
}

impl Requirement {
    pub fn runtime(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: DependencyGroup::Runtime,
        }
    }

    pub fn development(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: DependencyGroup::Development,
        }
    }
}

/// One asset file, relative to the component directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadFile {
    pub path: RelativePath,
    pub content: String,
}

impl PayloadFile {
    /// Content as it lands on disk: trailing whitespace trimmed, one final newline.
    pub fn normalized_content(&self) -> String {
        format!("{}\n", self.content.trim_end())
    }
}

/// The asset bundle copied into the host project.
///
/// Opaque to the installer apart from its file list, the packages it
/// needs and the styling plugins it expects to be registered.
#[derive(Debug, Clone, Default)]
pub struct Payload {
    files: Vec<PayloadFile>,
    requirements: Vec<Requirement>,
    styling_plugins: Vec<String>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(
        mut self,
        path: &str,
        content: impl Into<String>,
    ) -> Result<Self, DomainError> {
        self.files.push(PayloadFile {
            path: RelativePath::try_new(path)?,
            content: content.into(),
        });
        Ok(self)
    }

    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    /// Register a styling plugin by package name.
    pub fn with_styling_plugin(mut self, package: impl Into<String>) -> Self {
        self.styling_plugins.push(package.into());
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.files.is_empty() {
            return Err(DomainError::InvalidPayload("payload has no files".into()));
        }

        let mut seen = HashSet::new();
        for file in &self.files {
            if !seen.insert(file.path.as_path()) {
                return Err(DomainError::DuplicatePath {
                    path: file.path.to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn files(&self) -> &[PayloadFile] {
        &self.files
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    pub fn styling_plugins(&self) -> &[String] {
        &self.styling_plugins
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}
