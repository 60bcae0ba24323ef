use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// Final project structure ready for materialization.
///
/// This is the output of the template selector: a mapping from relative
/// output path to rendered content, anchored at the project root. It
/// contains no business logic, only data. Entries are kept in a `BTreeMap`
/// so iteration (and therefore writing and printing) order is stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStructure {
    pub(crate) root: PathBuf,
    pub(crate) files: BTreeMap<RelativePath, String>,
}

impl ProjectStructure {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: BTreeMap::new(),
        }
    }

    /// Add a rendered file.
    ///
    /// # Errors
    ///
    /// - `AbsolutePathNotAllowed` if `path` is absolute or escapes the root
    /// - `DuplicatePath` if `path` was already added
    pub fn add_file(
        &mut self,
        path: impl Into<PathBuf>,
        content: String,
    ) -> Result<(), DomainError> {
        let path = RelativePath::try_new(path)?;
        if self.files.contains_key(&path) {
            return Err(DomainError::DuplicatePath {
                path: path.to_string(),
            });
        }
        self.files.insert(path, content);
        Ok(())
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.files.is_empty() {
            return Err(DomainError::InvalidTemplate(
                "Project structure is empty".into(),
            ));
        }

        if let Some((path, _)) = self.files.iter().find(|(_, content)| content.trim().is_empty()) {
            return Err(DomainError::EmptyTemplate {
                template_id: path.to_string(),
            });
        }

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Content of the file at `path`, if present.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.get(path).is_some()
    }

    pub fn files(&self) -> impl Iterator<Item = RenderedFile<'_>> {
        self.files
            .iter()
            .map(|(path, content)| RenderedFile { path, content })
    }

    pub fn paths(&self) -> impl Iterator<Item = &RelativePath> {
        self.files.keys()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// One rendered output file, borrowed from a [`ProjectStructure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedFile<'a> {
    pub path: &'a RelativePath,
    pub content: &'a str,
}

impl RenderedFile<'_> {
    pub fn size(&self) -> usize {
        self.content.len()
    }
}
