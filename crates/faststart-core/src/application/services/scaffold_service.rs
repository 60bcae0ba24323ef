//! Scaffold Service - main application orchestrator.
//!
//! 1. Render the configuration through the [`TemplateSelector`]
//! 2. Write every file through the [`Filesystem`] port
//! 3. On a failed write, remove the root again if this run created it

use std::path::{Path, PathBuf};

use tracing::{field, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{ApplicationError, ports::Filesystem, services::TemplateSelector},
    domain::{ProjectConfig, ProjectStructure},
    error::{FastStartError, FastStartResult},
};

/// What to do when the project root already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Refuse with `ProjectExists`.
    #[default]
    CreateNew,
    /// Write into the existing directory, replacing generated files.
    Overwrite,
}

/// Outcome of a successful scaffold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub run_id: Uuid,
    pub root: PathBuf,
    /// Written files, relative to `root`, in write order.
    pub files: Vec<PathBuf>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    selector: TemplateSelector,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    pub fn new(selector: TemplateSelector, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            selector,
            filesystem,
        }
    }

    /// Render `config` and write it under `config.path()`.
    #[instrument(
        skip_all,
        fields(
            project = %config.name(),
            root = %config.path().display(),
            run_id = field::Empty,
        )
    )]
    pub fn scaffold(
        &self,
        config: &ProjectConfig,
        mode: WriteMode,
    ) -> FastStartResult<ScaffoldReport> {
        let run_id = Uuid::new_v4();
        tracing::Span::current().record("run_id", field::display(run_id));
        info!(config = %config, "Scaffolding project");

        let structure = self.selector.render(config)?;
        let files = self.write_structure(&structure, mode)?;

        info!(files = files.len(), "Scaffold completed successfully");
        Ok(ScaffoldReport {
            run_id,
            root: structure.root().to_path_buf(),
            files,
        })
    }

    /// Render without touching the filesystem.
    pub fn preview(&self, config: &ProjectConfig) -> FastStartResult<ProjectStructure> {
        self.selector.render(config)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn write_structure(
        &self,
        structure: &ProjectStructure,
        mode: WriteMode,
    ) -> FastStartResult<Vec<PathBuf>> {
        let root = structure.root();
        let root_existed = self.filesystem.exists(root);

        if root_existed && mode == WriteMode::CreateNew {
            return Err(ApplicationError::ProjectExists {
                path: root.to_path_buf(),
            }
            .into());
        }

        match self.write_all(structure) {
            Ok(files) => Ok(files),
            Err(e) if root_existed => {
                // Never delete a directory this run did not create.
                warn!(error = %e, "Write failed inside existing directory; leaving it in place");
                Err(e)
            }
            Err(e) => {
                warn!(error = %e, "Write failed, attempting rollback");
                self.rollback(root, e)
            }
        }
    }

    fn write_all(&self, structure: &ProjectStructure) -> FastStartResult<Vec<PathBuf>> {
        let root = structure.root();
        self.filesystem.create_dir_all(root)?;

        let mut written = Vec::with_capacity(structure.file_count());
        for file in structure.files() {
            let path = root.join(file.path);
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, file.content)?;
            written.push(file.path.as_path().to_path_buf());
        }
        Ok(written)
    }

    /// Best-effort rollback; always returns the original failure unless the
    /// cleanup itself fails.
    fn rollback<T>(&self, root: &Path, cause: FastStartError) -> FastStartResult<T> {
        match self.filesystem.remove_dir_all(root) {
            Ok(()) => {
                info!(path = %root.display(), "Rollback successful");
                Err(cause)
            }
            Err(e) => {
                warn!(error = %e, path = %root.display(), "Rollback failed");
                Err(ApplicationError::RollbackFailed {
                    path: root.to_path_buf(),
                    reason: format!("{cause}; cleanup failed: {e}"),
                }
                .into())
            }
        }
    }
}
