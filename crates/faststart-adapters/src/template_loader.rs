//! Filesystem-based payload loader.
//!
//! Discovers `template.toml` manifests under a directory and turns each into
//! a domain [`Template`] whose text is read from the file the manifest names.
//!
//! # Directory layout expected
//!
//! ```text
//! .faststart/templates/
//! ├── jwt-sql/
//! │   ├── template.toml
//! │   └── auth.py.tmpl
//! └── routers/
//!     └── root-only/
//!         ├── template.toml
//!         └── __init__.py.tmpl
//! ```
//!
//! # `template.toml` format
//!
//! ```toml
//! [template]
//! id          = "auth-jwt-sql"    # payload name to override
//! version     = "1.1.0"
//! file        = "auth.py.tmpl"    # relative to the manifest
//! description = "Team JWT flow"   # optional
//! ```

use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use faststart_core::domain::{DomainError, Template, TemplateId, TemplateSource};

pub const MANIFEST_FILE: &str = "template.toml";

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised `template.toml`.
#[derive(Debug, Deserialize, Clone)]
pub struct TemplateManifest {
    pub template: TemplateSection,
}

/// `[template]` section.
#[derive(Debug, Deserialize, Clone)]
pub struct TemplateSection {
    /// Payload name, e.g. `"auth-jwt-sql"`.
    pub id: String,
    pub version: String,
    /// Payload text file, relative to the manifest directory.
    pub file: PathBuf,
    pub description: Option<String>,
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads every valid payload override under `templates_dir`.
///
/// ```rust,ignore
/// let loader = FilesystemTemplateLoader::new(".faststart/templates");
/// let overrides = loader.load_all()?;
/// ```
pub struct FilesystemTemplateLoader {
    templates_dir: PathBuf,
}

impl FilesystemTemplateLoader {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Load every manifest found at any depth, in path order.
    ///
    /// # Errors
    ///
    /// `InvalidTemplate` if `templates_dir` is missing or unreadable.
    /// Individual manifests that fail to load are skipped with a `WARN`.
    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn load_all(&self) -> Result<Vec<Template>, DomainError> {
        if !self.templates_dir.is_dir() {
            return Err(DomainError::InvalidTemplate(format!(
                "templates directory not found: {}",
                self.templates_dir.display()
            )));
        }

        let mut templates = Vec::new();

        let walker = WalkDir::new(&self.templates_dir)
            .min_depth(1)
            .sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|e| {
                DomainError::InvalidTemplate(format!(
                    "failed to read templates directory '{}': {e}",
                    self.templates_dir.display()
                ))
            })?;

            if !entry.file_type().is_file() || entry.file_name() != MANIFEST_FILE {
                continue;
            }

            match self.load_manifest(entry.path()) {
                Ok(template) => {
                    debug!(id = %template.id, "loaded template override");
                    templates.push(template);
                }
                Err(e) => {
                    warn!(
                        manifest = %entry.path().display(),
                        error = %e,
                        "skipping template override due to load error"
                    );
                }
            }
        }

        debug!(count = templates.len(), "finished loading template overrides");
        Ok(templates)
    }

    /// Load a single manifest and the payload file it points at.
    fn load_manifest(&self, manifest_path: &Path) -> Result<Template, DomainError> {
        let raw = fs::read_to_string(manifest_path).map_err(|e| {
            DomainError::InvalidTemplate(format!(
                "failed to read '{}': {e}",
                manifest_path.display()
            ))
        })?;

        let manifest: TemplateManifest = toml::from_str(&raw).map_err(|e| {
            DomainError::InvalidTemplate(format!(
                "failed to parse '{}': {e}",
                manifest_path.display()
            ))
        })?;
        let section = manifest.template;

        if section.id.is_empty() || section.id.contains('@') || section.version.is_empty() {
            return Err(DomainError::InvalidTemplate(format!(
                "invalid id '{}@{}' in '{}'",
                section.id,
                section.version,
                manifest_path.display()
            )));
        }

        let escapes = section
            .file
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: section.file.display().to_string(),
            });
        }

        let dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));
        let payload_path = dir.join(&section.file);
        let text = fs::read_to_string(&payload_path).map_err(|e| {
            DomainError::InvalidTemplate(format!(
                "failed to read payload '{}': {e}",
                payload_path.display()
            ))
        })?;

        let template = Template::new(
            TemplateId::new(section.id, section.version),
            section
                .description
                .unwrap_or_else(|| format!("Override from {}", dir.display())),
            TemplateSource::Owned(normalize_newlines(text)),
        );
        template.validate()?;
        Ok(template)
    }
}

/// CRLF payloads would leak `\r` into generated Python files.
fn normalize_newlines(text: String) -> String {
    if text.contains("\r\n") {
        text.replace("\r\n", "\n")
    } else {
        text
    }
}
