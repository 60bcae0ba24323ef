//! Infrastructure adapters for FastStart.
//!
//! Implements the ports defined in `faststart-core::application::ports`.
//! All I/O lives here.

pub mod builtin_templates;
pub mod filesystem;
pub mod template_loader;
pub mod template_store;

pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use template_loader::FilesystemTemplateLoader;
pub use template_store::InMemoryStore;
