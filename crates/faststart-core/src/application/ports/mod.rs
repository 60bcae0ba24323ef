//! Driven (output) ports, implemented by `faststart-adapters`.
//!
//! - `Filesystem`: directory creation and file writes
//! - `TemplateStore`: payload storage and lookup

use std::path::Path;

use crate::domain::{Template, TemplateId};
use crate::error::FastStartResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `faststart_adapters::LocalFilesystem` (production)
/// - `faststart_adapters::MemoryFilesystem` (testing, dry runs)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> FastStartResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> FastStartResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> FastStartResult<()>;
}

/// Port for payload storage and retrieval.
///
/// Lookup is by name; a store holds at most one payload per name, so an
/// override replaces the built-in of the same name regardless of version.
///
/// Implemented by `faststart_adapters::InMemoryStore`.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Get the payload registered under `name`.
    fn get(&self, name: &str) -> FastStartResult<Template>;

    /// List all payloads, ordered by name.
    fn list(&self) -> FastStartResult<Vec<Template>>;

    /// Insert a payload, replacing any with the same name.
    fn insert(&self, template: Template) -> FastStartResult<()>;

    /// Remove a payload by id.
    fn remove(&self, id: &TemplateId) -> FastStartResult<()>;
}
